//! Command-line interface definitions for the newsletter runner.
//!
//! The external scheduler invokes this binary once per cadence; the CLI
//! only carries operational knobs. Credentials and endpoints come from
//! the environment (see `config`).

use clap::Parser;

/// Command-line arguments for the newsletter runner.
///
/// # Examples
///
/// ```sh
/// # Daily run with the default templates directory
/// curiodaily
///
/// # Weekly run with templates elsewhere
/// curiodaily --weekly -t /srv/curiodaily/templates
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory containing the newsletter HTML templates
    #[arg(short, long, default_value = "templates")]
    pub templates_dir: String,

    /// Run the weekly topic registry instead of the daily one
    #[arg(long)]
    pub weekly: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["curiodaily"]);
        assert_eq!(cli.templates_dir, "templates");
        assert!(!cli.weekly);
    }

    #[test]
    fn test_cli_weekly_flag() {
        let cli = Cli::parse_from(["curiodaily", "--weekly", "-t", "/srv/templates"]);
        assert!(cli.weekly);
        assert_eq!(cli.templates_dir, "/srv/templates");
    }
}
