//! Near-duplicate article removal.
//!
//! The fingerprint is the lowercased `title + " " + description`. Most
//! topics dedupe by exact fingerprint equality; the Science topic also
//! applies an approximate similarity test (sequence-matcher ratio > 0.8)
//! because wire-service science stories circulate in near-identical
//! variants under different URLs. Both paths are stable with respect to
//! first occurrence.

use crate::models::Article;
use itertools::Itertools;
use tracing::debug;

/// Similarity threshold for the fuzzy path.
const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Remove duplicate articles, keeping the first occurrence of each
/// fingerprint. `fuzzy` selects the approximate similarity test instead
/// of exact equality.
pub fn unique(articles: Vec<Article>, fuzzy: bool) -> Vec<Article> {
    let before = articles.len();
    let unique = if fuzzy {
        unique_fuzzy(articles)
    } else {
        unique_exact(articles)
    };
    debug!(before, after = unique.len(), fuzzy, "Deduplicated articles");
    unique
}

fn unique_exact(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .unique_by(|a| a.combined_text())
        .collect()
}

fn unique_fuzzy(articles: Vec<Article>) -> Vec<Article> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for article in articles {
        let content = article.combined_text();
        let duplicate = seen.iter().any(|s| similarity(s, &content) > SIMILARITY_THRESHOLD);
        if !duplicate {
            seen.push(content);
            out.push(article);
        }
    }

    out
}

/// Sequence-matcher similarity ratio between two strings: `2.0 * M / T`
/// where `M` is the total length of matched blocks (Ratcliff/Obershelp)
/// and `T` the combined length. 1.0 means identical, 0.0 disjoint.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_len(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Total length of matching blocks: find the longest common substring,
/// then recurse on the pieces to its left and right.
fn matching_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Longest common substring via the rolling-row DP.
    let mut best_len = 0usize;
    let mut best_a = 0usize;
    let mut best_b = 0usize;
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                row[j + 1] = len;
                if len > best_len {
                    best_len = len;
                    best_a = i + 1 - len;
                    best_b = j + 1 - len;
                }
            }
        }
        prev = row;
    }

    if best_len == 0 {
        return 0;
    }

    best_len
        + matching_len(&a[..best_a], &b[..best_b])
        + matching_len(&a[best_a + best_len..], &b[best_b + best_len..])
}
