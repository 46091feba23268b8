//! Database access: topic registries, subscriber snapshots, and newsletter
//! persistence.
//!
//! The daily store target is the `newsletters` table; the weekly target is
//! `weekly_newsletter`, which has no subscriber snapshot and carries a
//! `key_highlight` projection instead of email content. Both inserts are
//! single statements, so a failure leaves no partial row behind.
//!
//! `subscription_ids` is stored as a comma-separated decimal list; that
//! exact format is the contract the email-dispatch worker parses. An empty
//! string is valid (a topic with no subscribers still gets a row).

use crate::models::{Highlight, TopicRow};
use itertools::Itertools;
use sqlx::PgPool;
use tracing::{info, instrument};

/// Read the active daily topic registry.
#[instrument(level = "debug", skip_all)]
pub async fn active_topics(pool: &PgPool) -> Result<Vec<TopicRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i32, String)>(
        r#"
        SELECT id, name
        FROM topics
        WHERE is_active = true
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| TopicRow { id, name }).collect())
}

/// Read the active weekly topic registry.
#[instrument(level = "debug", skip_all)]
pub async fn active_weekly_topics(pool: &PgPool) -> Result<Vec<TopicRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i32, String)>(
        r#"
        SELECT id, name
        FROM weekly_newsletter_topics
        WHERE is_active = true
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| TopicRow { id, name }).collect())
}

/// Snapshot the active subscriber ids for a topic.
///
/// Joined through the subscription↔topic association table and ordered by
/// id so the snapshot — and therefore downstream email fan-out — is
/// deterministic. The snapshot reflects exactly the moment of this read;
/// mid-job subscription changes are not observed.
#[instrument(level = "debug", skip_all, fields(topic_id))]
pub async fn active_subscriber_ids(pool: &PgPool, topic_id: i32) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i32,)>(
        r#"
        SELECT s.id
        FROM subscriptions s
        JOIN subscription_topic st ON s.id = st.subscription_id
        WHERE s.is_active = true
          AND st.topic_id = $1
        ORDER BY s.id
        "#,
    )
    .bind(topic_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id.to_string()).collect())
}

/// Serialize a subscriber snapshot for the `subscription_ids` column.
pub fn join_subscriber_ids(ids: &[String]) -> String {
    ids.join(",")
}

/// Comma-joined projection of the first three highlight texts, stored on
/// weekly rows as `key_highlight`.
pub fn key_highlight(highlights: &[Highlight]) -> String {
    highlights.iter().take(3).map(|h| h.text.as_str()).join(", ")
}

/// Insert a daily newsletter row with both rendered variants and the
/// subscriber snapshot. Returns the new row id.
#[instrument(level = "info", skip_all, fields(topic_id, subscribers = subscriber_ids.len()))]
pub async fn insert_newsletter(
    pool: &PgPool,
    title: &str,
    web_html: &str,
    email_html: &str,
    topic_id: i32,
    subscriber_ids: &[String],
) -> Result<i32, sqlx::Error> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO newsletters (title, content, email_content, topic_id, subscription_ids)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(web_html)
    .bind(email_html)
    .bind(topic_id)
    .bind(join_subscriber_ids(subscriber_ids))
    .fetch_one(pool)
    .await?;

    info!(newsletter_id = id, "Newsletter stored");
    Ok(id)
}

/// Insert a weekly newsletter row. Returns the new row id.
#[instrument(level = "info", skip_all, fields(topic_id))]
pub async fn insert_weekly_newsletter(
    pool: &PgPool,
    title: &str,
    content: &str,
    topic_id: i32,
    key_highlight: &str,
) -> Result<i32, sqlx::Error> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO weekly_newsletter (title, content, weeklynewsletter_topic_id, key_highlight)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(topic_id)
    .bind(key_highlight)
    .fetch_one(pool)
    .await?;

    info!(weekly_newsletter_id = id, "Weekly newsletter stored");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(text: &str) -> Highlight {
        Highlight {
            text: text.to_string(),
            category: "General".to_string(),
            icon: None,
            color: None,
        }
    }

    #[test]
    fn test_join_subscriber_ids() {
        let ids = vec!["11".to_string(), "12".to_string(), "13".to_string(), "14".to_string()];
        assert_eq!(join_subscriber_ids(&ids), "11,12,13,14");
    }

    #[test]
    fn test_join_subscriber_ids_empty_is_valid() {
        assert_eq!(join_subscriber_ids(&[]), "");
    }

    #[test]
    fn test_key_highlight_takes_first_three() {
        let hs = vec![highlight("A"), highlight("B"), highlight("C"), highlight("D")];
        assert_eq!(key_highlight(&hs), "A, B, C");
    }

    #[test]
    fn test_key_highlight_with_fewer_than_three() {
        assert_eq!(key_highlight(&[highlight("Only one")]), "Only one");
        assert_eq!(key_highlight(&[]), "");
    }
}
