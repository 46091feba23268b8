//! HTML rendering by literal placeholder substitution.
//!
//! Templates are plain HTML files carrying a fixed token set; this is
//! deliberately not a general templating engine. Rendering is pure: the
//! same digest, date, and base URL always produce byte-identical output.
//!
//! `{{unsubscribe_link}}` is replaced with the literal sentinel
//! `{{unsubscribe_link_placeholder}}` — the email-dispatch worker
//! substitutes it per recipient, so the renderer must never resolve it.

use crate::enrich::categorize;
use crate::models::Digest;
use crate::profiles::TopicProfile;
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Tokens every template must contain. A template missing any of them is
/// rejected at load time, which fails the job before anything is stored.
pub const REQUIRED_TOKENS: [&str; 7] = [
    "{{dynamic_title}}",
    "{{current_date}}",
    "{{summary}}",
    "{{highlights}}",
    "{{articles}}",
    "{{base_url}}",
    "{{unsubscribe_link}}",
];

/// Deferred-substitution sentinel left in stored email HTML.
pub const UNSUBSCRIBE_SENTINEL: &str = "{{unsubscribe_link_placeholder}}";

/// Image used when an article has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";

/// Template file names, relative to the templates directory.
pub const WEB_TEMPLATE: &str = "newsletter_template.html";
pub const EMAIL_TEMPLATE: &str = "email_template.html";
pub const WEEKLY_TEMPLATE: &str = "weekly_newsletter_template.html";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template {name} is missing placeholder {token}")]
    MissingToken { name: String, token: &'static str },
}

/// A validated HTML template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Validate template source: every required token must be present.
    pub fn from_source(name: &str, source: String) -> Result<Self, RenderError> {
        for token in REQUIRED_TOKENS {
            if !source.contains(token) {
                return Err(RenderError::MissingToken { name: name.to_string(), token });
            }
        }
        Ok(Self { source })
    }

    /// Load and validate a template file from the templates directory.
    pub async fn load(dir: &Path, name: &str) -> Result<Self, RenderError> {
        let path = dir.join(name);
        let source = tokio::fs::read_to_string(&path).await.map_err(|source| RenderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), bytes = source.len(), "Loaded template");
        Self::from_source(name, source)
    }
}

/// Render a digest into a template.
///
/// `date` is the job's wall-clock date, formatted "Month DD, YYYY".
pub fn render(
    template: &Template,
    digest: &Digest,
    profile: &TopicProfile,
    date: NaiveDate,
    base_url: &str,
) -> String {
    template
        .source
        .replace("{{dynamic_title}}", &digest.title)
        .replace("{{current_date}}", &date.format("%B %d, %Y").to_string())
        .replace("{{summary}}", &format!("<p>{}</p>", digest.summary))
        .replace("{{highlights}}", &highlights_html(digest))
        .replace("{{articles}}", &articles_html(digest, profile))
        .replace("{{base_url}}", base_url)
        .replace("{{unsubscribe_link}}", UNSUBSCRIBE_SENTINEL)
}

fn highlights_html(digest: &Digest) -> String {
    let mut html = String::new();
    for h in &digest.highlights {
        html.push_str("<div class=\"highlight-item\">\n");
        if let (Some(icon), Some(color)) = (&h.icon, &h.color) {
            let icon = icon.to_lowercase().replace(' ', "-");
            let _ = write!(
                html,
                "  <span class=\"highlight-icon\" style=\"background-color: {color};\">\
<i class=\"fas fa-{icon}\" aria-hidden=\"true\"></i></span>\n"
            );
        }
        let _ = write!(
            html,
            "  <div class=\"highlight-content\"><p>{text}</p></div>\n</div>\n",
            text = h.text
        );
    }
    html
}

fn articles_html(digest: &Digest, profile: &TopicProfile) -> String {
    let mut html = String::new();
    for article in &digest.articles {
        let categories = categorize(article, profile).join(", ");
        let image = article.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE);
        let _ = write!(
            html,
            "<article class=\"article\">\n\
             \x20 <span class=\"article-category\">{categories}</span>\n\
             \x20 <h3>{title}</h3>\n\
             \x20 <img src=\"{image}\" alt=\"Article image\" class=\"article-image\">\n\
             \x20 <p>{description}</p>\n\
             \x20 <a href=\"{url}\" class=\"read-more\" target=\"_blank\">Read More</a>\n\
             </article>\n",
            title = article.title,
            description = article.description,
            url = article.url,
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, Highlight};
    use crate::profiles::find_daily;

    const TEMPLATE: &str = "<html><body>\
        <h1>{{dynamic_title}}</h1>\
        <time>{{current_date}}</time>\
        <section>{{summary}}</section>\
        <section>{{highlights}}</section>\
        <section>{{articles}}</section>\
        <a href=\"{{base_url}}\">home</a>\
        <a href=\"{{unsubscribe_link}}\">unsubscribe</a>\
        </body></html>";

    fn digest() -> Digest {
        Digest {
            title: "AI Weekly: Models Advance".to_string(),
            summary: "Two-line summary.".to_string(),
            highlights: vec![Highlight {
                text: "H1".to_string(),
                category: "GenAI".to_string(),
                icon: Some("Robot Arm".to_string()),
                color: Some("#00A86B".to_string()),
            }],
            articles: vec![Article {
                title: "Story 0".to_string(),
                description: "Description 0".to_string(),
                url: "https://example.com/0".to_string(),
                image_url: Some("https://example.com/0.jpg".to_string()),
                source_name: "Wire".to_string(),
                published_at: "2026-08-24T09:00:00Z".to_string(),
            }],
        }
    }

    fn template() -> Template {
        Template::from_source("test.html", TEMPLATE.to_string()).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let broken = TEMPLATE.replace("{{articles}}", "");
        let err = Template::from_source("broken.html", broken).unwrap_err();
        match err {
            RenderError::MissingToken { token, .. } => assert_eq!(token, "{{articles}}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_render_substitutes_all_tokens() {
        let profile = find_daily("AI").unwrap();
        let html = render(&template(), &digest(), profile, date(), "https://www.thecuriodaily.com");

        assert!(html.contains("AI Weekly: Models Advance"));
        assert!(html.contains("August 25, 2026"));
        assert!(html.contains("<p>Two-line summary.</p>"));
        assert!(html.contains("highlight-item"));
        assert!(html.contains("H1"));
        assert!(html.contains("Story 0"));
        assert!(html.contains("https://www.thecuriodaily.com"));
        for token in REQUIRED_TOKENS {
            assert!(!html.contains(token), "token {token} survived substitution");
        }
    }

    #[test]
    fn test_unsubscribe_sentinel_is_left_in_place() {
        let profile = find_daily("AI").unwrap();
        let html = render(&template(), &digest(), profile, date(), "https://x.example");
        assert!(html.contains(UNSUBSCRIBE_SENTINEL));
    }

    #[test]
    fn test_render_is_pure() {
        let profile = find_daily("AI").unwrap();
        let a = render(&template(), &digest(), profile, date(), "https://x.example");
        let b = render(&template(), &digest(), profile, date(), "https://x.example");
        assert_eq!(a, b);
    }

    #[test]
    fn test_icon_and_color_render_when_present() {
        let profile = find_daily("AI").unwrap();
        let html = render(&template(), &digest(), profile, date(), "https://x.example");
        assert!(html.contains("fa-robot-arm"));
        assert!(html.contains("background-color: #00A86B"));
    }

    #[test]
    fn test_highlight_without_icon_omits_icon_span() {
        let mut d = digest();
        d.highlights[0].icon = None;
        d.highlights[0].color = None;
        let profile = find_daily("AI").unwrap();
        let html = render(&template(), &d, profile, date(), "https://x.example");
        assert!(!html.contains("highlight-icon"));
        assert!(html.contains("H1"));
    }

    #[test]
    fn test_missing_image_falls_back_to_placeholder() {
        let mut d = digest();
        d.articles[0].image_url = None;
        let profile = find_daily("AI").unwrap();
        let html = render(&template(), &d, profile, date(), "https://x.example");
        assert!(html.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_empty_digest_still_renders() {
        let d = Digest {
            title: "Today's AI Highlights".to_string(),
            summary: "Quiet day.".to_string(),
            highlights: vec![],
            articles: vec![],
        };
        let profile = find_daily("AI").unwrap();
        let html = render(&template(), &d, profile, date(), "https://x.example");
        assert!(html.contains("Today's AI Highlights"));
        assert!(!html.is_empty());
    }

    #[tokio::test]
    async fn test_load_validates_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        tokio::fs::write(&good, TEMPLATE).await.unwrap();
        assert!(Template::load(dir.path(), "good.html").await.is_ok());

        let bad = dir.path().join("bad.html");
        tokio::fs::write(&bad, TEMPLATE.replace("{{highlights}}", "")).await.unwrap();
        assert!(matches!(
            Template::load(dir.path(), "bad.html").await,
            Err(RenderError::MissingToken { .. })
        ));

        assert!(matches!(
            Template::load(dir.path(), "absent.html").await,
            Err(RenderError::Io { .. })
        ));
    }
}
