//! Data models for articles, highlights, and enriched newsletter content.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`Article`]: A candidate article fetched from the news-search API
//! - [`Highlight`]: A short headline-like string derived from top articles
//! - [`Digest`]: The enriched bundle (title, summary, highlights, articles)
//!   produced by the LLM enricher or its fallback
//! - [`TopicRow`]: A row from the topic registry that drives job discovery
//! - Wire types for the news-search API response
//!
//! Articles are transient: they live for the duration of a single job run
//! and are never persisted.

use serde::Deserialize;

/// A candidate article for the current newsletter run.
///
/// Built from the news-search API response after boundary filtering:
/// articles missing a title, description, or image URL never make it
/// into one of these.
#[derive(Debug, Clone)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// The short description or dek supplied by the search API.
    pub description: String,
    /// Link to the full story.
    pub url: String,
    /// Lead image URL. Boundary filtering requires it, but the renderer
    /// still falls back to a placeholder if it is absent.
    pub image_url: Option<String>,
    /// Publisher name as reported by the search API.
    pub source_name: String,
    /// Publication timestamp as reported by the search API (RFC 3339).
    pub published_at: String,
}

impl Article {
    /// Lowercased `title + " " + description`, the text every pure stage
    /// (dedupe fingerprint, ranking, categorization) operates on.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// A short highlight derived from the top-ranked articles.
///
/// `icon` and `color` are optional decorations the LLM may suggest
/// (a Font Awesome icon name and a hex color); the renderer uses them
/// when present and omits the icon span otherwise.
#[derive(Debug, Clone)]
pub struct Highlight {
    /// Highlight text, clipped to 170 characters.
    pub text: String,
    /// Category tag for the highlight.
    pub category: String,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Optional hex color for the icon background.
    pub color: Option<String>,
}

/// The enriched newsletter content for one topic run.
///
/// Produced either by the LLM (happy path) or by the deterministic
/// fallback. Downstream stages cannot observe which path produced it.
#[derive(Debug)]
pub struct Digest {
    /// The dynamic newsletter title.
    pub title: String,
    /// A short overview of the day's developments.
    pub summary: String,
    /// Up to 5 highlights.
    pub highlights: Vec<Highlight>,
    /// The filtered article list, at most 10 entries.
    pub articles: Vec<Article>,
}

/// A row from the topic registry (`topics` or `weekly_newsletter_topics`).
///
/// The orchestrator matches registry names to runnable topic profiles;
/// the row's `id` is the foreign key stored on the newsletter row.
#[derive(Debug, Clone)]
pub struct TopicRow {
    pub id: i32,
    pub name: String,
}

/// Response envelope from the news-search API `everything` endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// One article as returned by the news-search API. All fields are nullable
/// on the wire; boundary filtering decides what survives.
#[derive(Debug, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub source: RawSource,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// Publisher block nested inside a [`RawArticle`].
#[derive(Debug, Default, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

impl RawArticle {
    /// Promote a wire article to an [`Article`], applying the boundary
    /// filter: title, description, and image URL must all be present.
    pub fn into_article(self) -> Option<Article> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let description = self.description.filter(|d| !d.is_empty())?;
        let image_url = self.url_to_image.filter(|u| !u.is_empty())?;
        Some(Article {
            title,
            description,
            url: self.url.unwrap_or_default(),
            image_url: Some(image_url),
            source_name: self.source.name.unwrap_or_else(|| "Unknown Source".to_string()),
            published_at: self.published_at.unwrap_or_default(),
        })
    }
}
