//! Deterministic keyword-weighted article ranking.
//!
//! The score is an integer-weighted sum of term occurrences over the
//! lowercased `title + " " + description`:
//!
//! ```text
//! score = 2 * priority_hits + entity_hits + ambient_hits
//! ```
//!
//! Sorting is stable, so ties keep their original order and the final
//! ordering is deterministic for a given input sequence.

use crate::models::Article;
use crate::profiles::TopicProfile;
use std::cmp::Reverse;
use tracing::debug;

/// How many ranked articles move forward to enrichment.
pub const TOP_ARTICLES: usize = 10;

/// Relevance score for one article under a topic profile.
pub fn score(article: &Article, profile: &TopicProfile) -> u64 {
    let text = article.combined_text();

    let count_terms = |terms: &[&str]| -> u64 {
        terms.iter().map(|t| text.matches(t).count() as u64).sum()
    };

    2 * count_terms(profile.priority_terms)
        + count_terms(profile.entity_terms)
        + count_terms(profile.ambient_terms)
}

/// Sort articles descending by score, stable on ties. The input should
/// already be deduplicated.
pub fn rank(mut articles: Vec<Article>, profile: &TopicProfile) -> Vec<Article> {
    articles.sort_by_key(|a| Reverse(score(a, profile)));
    debug!(count = articles.len(), topic = profile.name, "Ranked articles");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::find_daily;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            url: "https://example.com/a".to_string(),
            image_url: Some("https://example.com/img.jpg".to_string()),
            source_name: "Wire".to_string(),
            published_at: "2026-08-24T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_priority_terms_weigh_double() {
        let profile = find_daily("AI").unwrap();
        // "foundation model" is a priority term, "nvidia" an entity term.
        let priority = article("Foundation model released", "a new foundation model");
        let entity = article("Nvidia results", "nvidia posted earnings");
        assert!(score(&priority, profile) > score(&entity, profile));
    }

    #[test]
    fn test_score_counts_repeated_occurrences() {
        let profile = find_daily("AI").unwrap();
        let once = article("GPT news", "something happened");
        let twice = article("GPT beats GPT", "gpt again");
        assert!(score(&twice, profile) > score(&once, profile));
    }

    #[test]
    fn test_rank_is_monotone_non_increasing() {
        let profile = find_daily("AI").unwrap();
        let input = vec![
            article("Weather today", "sunny in parts"),
            article("OpenAI ships GPT upgrade", "large language model work from openai"),
            article("Nvidia earnings", "nvidia and amd"),
        ];
        let ranked = rank(input, profile);
        let scores: Vec<u64> = ranked.iter().map(|a| score(a, profile)).collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_rank_is_a_permutation() {
        let profile = find_daily("Space").unwrap();
        let input = vec![
            article("A", "launch"),
            article("B", "nothing relevant"),
            article("C", "nasa rover lander"),
        ];
        let mut before: Vec<String> = input.iter().map(|a| a.title.clone()).collect();
        let mut after: Vec<String> = rank(input, profile).iter().map(|a| a.title.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let profile = find_daily("Health").unwrap();
        let input = vec![
            article("First zero-score story", "nothing to see"),
            article("Second zero-score story", "still nothing"),
            article("Third zero-score story", "also nothing"),
        ];
        let titles: Vec<String> = rank(input, profile).into_iter().map(|a| a.title).collect();
        assert_eq!(
            titles,
            vec![
                "First zero-score story",
                "Second zero-score story",
                "Third zero-score story"
            ]
        );
    }
}
