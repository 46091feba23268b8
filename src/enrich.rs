//! LLM enrichment: dynamic title, overview, highlights, and the filtered
//! article selection.
//!
//! One chat completion per job. The model receives the indexed candidate
//! list and must answer with strict JSON:
//!
//! ```json
//! {
//!   "filtered_indices": [0, 2, 5],
//!   "highlights": [{"text": "...", "category": "...", "icon": "...", "color": "#..."}],
//!   "title": "...",
//!   "summary": "..."
//! }
//! ```
//!
//! Anything that deviates — transport error, parse error, missing
//! required fields — routes to the deterministic fallback. The fallback
//! produces a digest structurally identical to the happy path, so
//! downstream stages cannot tell which path ran.
//!
//! Per-article category tags are assigned locally from the profile's
//! keyword→category map, never by the LLM, so they are reproducible from
//! the article text alone.

use crate::models::{Article, Digest, Highlight};
use crate::openai::ChatCompletion;
use crate::profiles::TopicProfile;
use crate::utils::{clip_chars, truncate_for_log};
use serde::Deserialize;
use std::fmt::Write as _;
use tracing::{info, instrument, warn};

/// Hard cap on articles carried into the rendered newsletter.
pub const MAX_ARTICLES: usize = 10;
/// Hard cap on highlights.
pub const MAX_HIGHLIGHTS: usize = 5;
/// Character cap per highlight text.
pub const MAX_HIGHLIGHT_CHARS: usize = 170;

/// The strict-JSON shape the model must return. `filtered_indices` and
/// `highlights` are required; a response missing either fails parsing
/// and falls back. Title and summary get deterministic defaults instead.
#[derive(Debug, Deserialize)]
struct LlmDigest {
    filtered_indices: Vec<i64>,
    highlights: Vec<LlmHighlight>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LlmHighlight {
    #[serde(default)]
    text: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

/// Assign category tags to an article from the profile's keyword map.
///
/// Pure and deterministic: the same article text always yields the same
/// tags. Articles matching no category receive `General <Topic> News`.
pub fn categorize(article: &Article, profile: &TopicProfile) -> Vec<String> {
    let text = article.combined_text();
    let tags: Vec<String> = profile
        .categories
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| category.to_string())
        .collect();

    if tags.is_empty() {
        vec![profile.default_category()]
    } else {
        tags
    }
}

/// Produce the enriched digest for the top-ranked articles.
///
/// Never fails: every LLM-side problem is logged and converted into the
/// fallback digest.
#[instrument(level = "info", skip_all, fields(topic = profile.name, candidates = articles.len()))]
pub async fn enrich<C: ChatCompletion>(
    chat: &C,
    articles: Vec<Article>,
    profile: &TopicProfile,
) -> Digest {
    let system = system_prompt(profile);
    let user = user_prompt(&articles, profile);

    let raw = match chat.complete(&system, &user).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "LLM call failed; using fallback digest");
            return fallback(articles, profile);
        }
    };

    let parsed: LlmDigest = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(&raw, 300),
                "Model returned non-conforming JSON; using fallback digest"
            );
            return fallback(articles, profile);
        }
    };

    let digest = validate(parsed, articles, profile);
    info!(
        articles = digest.articles.len(),
        highlights = digest.highlights.len(),
        "Enrichment complete"
    );
    digest
}

/// Apply the contract's clamping rules to a parsed response.
fn validate(parsed: LlmDigest, articles: Vec<Article>, profile: &TopicProfile) -> Digest {
    let selected: Vec<Article> = parsed
        .filtered_indices
        .iter()
        .filter_map(|&idx| usize::try_from(idx).ok())
        .filter(|&idx| idx < articles.len())
        .map(|idx| articles[idx].clone())
        .take(MAX_ARTICLES)
        .collect();

    let highlights: Vec<Highlight> = parsed
        .highlights
        .into_iter()
        .filter(|h| !h.text.is_empty())
        .take(MAX_HIGHLIGHTS)
        .map(|h| Highlight {
            text: clip_chars(&h.text, MAX_HIGHLIGHT_CHARS),
            category: h.category.filter(|c| !c.is_empty()).unwrap_or_else(|| "General".to_string()),
            icon: h.icon,
            color: h.color,
        })
        .collect();

    let title = match parsed.title.filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None => format!("Today's {} Highlights", profile.name),
    };

    let summary = match parsed.summary.filter(|s| !s.trim().is_empty()) {
        Some(summary) => summary,
        None => profile.fallback_summary.to_string(),
    };

    Digest { title, summary, highlights, articles: selected }
}

/// Deterministic digest used when the LLM path fails in any way.
pub fn fallback(articles: Vec<Article>, profile: &TopicProfile) -> Digest {
    let highlights: Vec<Highlight> = articles
        .iter()
        .take(MAX_HIGHLIGHTS)
        .map(|a| Highlight {
            text: clip_chars(&a.title, MAX_HIGHLIGHT_CHARS),
            category: categorize(a, profile)
                .into_iter()
                .next()
                .unwrap_or_else(|| profile.default_category()),
            icon: None,
            color: None,
        })
        .collect();

    let articles: Vec<Article> = articles.into_iter().take(MAX_ARTICLES).collect();

    Digest {
        title: format!("Today's {} Updates", profile.name),
        summary: profile.fallback_summary.to_string(),
        highlights,
        articles,
    }
}

fn system_prompt(profile: &TopicProfile) -> String {
    format!(
        "{persona}\n\n\
         Output format must be valid JSON:\n\
         {{\n\
           \"filtered_indices\": [array of article indices worth publishing],\n\
           \"highlights\": [\n\
             {{\"text\": \"highlight text, max {max_chars} chars\", \"category\": \"category name\", \
\"icon\": \"optional icon name\", \"color\": \"optional hex color\"}}\n\
           ],\n\
           \"title\": \"{topic} [Theme]: [Specific Detail]\",\n\
           \"summary\": \"2-4 line overview of the day's developments\"\n\
         }}",
        persona = profile.persona,
        max_chars = MAX_HIGHLIGHT_CHARS,
        topic = profile.name,
    )
}

fn user_prompt(articles: &[Article], profile: &TopicProfile) -> String {
    let mut prompt = format!("Analyze these {} news articles:\n\n", profile.name);
    for (idx, article) in articles.iter().enumerate() {
        let categories = categorize(article, profile).join(", ");
        let _ = write!(
            prompt,
            "Index: {idx}\nTitle: {title}\nDescription: {description}\nCategory guess: {categories}\nSource: {source}\nPublished: {published}\n\n",
            title = article.title,
            description = article.description,
            source = article.source_name,
            published = article.published_at,
        );
    }
    prompt.push_str(
        "Select the articles worth publishing, produce up to 5 highlights, \
         a dynamic title, and a short overview. Respond with JSON only.",
    );
    prompt
}
