//! News-search API client.
//!
//! One request per query shard against the `everything` endpoint, fanned
//! out with a concurrency cap of 5. A shard that fails (transport error,
//! non-2xx status, or unparseable body) is logged and contributes an
//! empty list; a single shard's failure never fails the job. There are
//! no retries — the 10 second request timeout is the only budget.
//!
//! Articles missing a title, description, or image URL are discarded at
//! this boundary.

use crate::models::{Article, SearchResponse};
use crate::profiles::TopicProfile;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum simultaneous shard requests per job.
const SHARD_CONCURRENCY: usize = 5;

/// Client for the external article search API.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl NewsClient {
    /// Build a client around the given API credential.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, which only
    /// happens in broken build environments.
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            api_key,
            endpoint: EVERYTHING_URL.to_string(),
        }
    }

    /// Override the API endpoint. Used by tests.
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Fetch the union of all query shards for a topic over a date window.
    ///
    /// Ordering within the union is not significant; dedupe and ranking
    /// normalize it downstream.
    #[instrument(level = "info", skip_all, fields(topic = profile.name, %from, %to))]
    pub async fn fetch_window(
        &self,
        profile: &TopicProfile,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<Article> {
        let articles: Vec<Article> = stream::iter(profile.query_shards.iter())
            .map(|shard| self.fetch_shard(shard, profile.page_size, from, to))
            .buffer_unordered(SHARD_CONCURRENCY)
            .collect::<Vec<Vec<Article>>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        info!(count = articles.len(), "Fetched articles across shards");
        articles
    }

    /// Fetch a single shard. Failures are logged and reported as an
    /// empty list.
    async fn fetch_shard(
        &self,
        shard: &str,
        page_size: u32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<Article> {
        match self.try_fetch_shard(shard, page_size, from, to).await {
            Ok(articles) => {
                debug!(shard, count = articles.len(), "Shard fetched");
                articles
            }
            Err(e) => {
                warn!(shard, error = %e, "Shard fetch failed; treating as empty");
                Vec::new()
            }
        }
    }

    async fn try_fetch_shard(
        &self,
        shard: &str,
        page_size: u32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Article>, reqwest::Error> {
        let page_size = page_size.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", shard),
                ("from", &from.to_string()),
                ("to", &to.to_string()),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", &page_size),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        Ok(body
            .articles
            .into_iter()
            .filter_map(|raw| raw.into_article())
            .collect())
    }
}
