//! Reddit collector over the OAuth API

use crate::config::RedditConfig;
use crate::source::PostSource;
use crate::wire::{Listing, Submission, Thing, TokenResponse};
use async_trait::async_trait;
use chrono::DateTime;
use headline_core::{newest_first, Error, Post, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

const REDDIT_WEB: &str = "https://www.reddit.com";

/// Strip a leading `r/` or `/r/` from a channel name
pub fn normalize_channel(channel: &str) -> &str {
    let trimmed = channel.trim();
    trimmed
        .strip_prefix("/r/")
        .or_else(|| trimmed.strip_prefix("r/"))
        .unwrap_or(trimmed)
        .trim_matches('/')
}

pub struct RedditSource {
    config: RedditConfig,
    http_client: reqwest::Client,
}

impl RedditSource {
    /// Create a collector; fails with `SourceUnavailable` when credentials are missing
    pub fn new(config: RedditConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(Error::source_unavailable(
                "Reddit credentials missing (set REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET)",
            ));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::source_unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn access_token(&self) -> Result<String> {
        let url = format!(
            "{}/api/v1/access_token",
            self.config.auth_url.trim_end_matches('/')
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| Error::source_unavailable(format!("Reddit unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::source_unavailable(format!(
                "credentials rejected ({})",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::source_unavailable(format!("Malformed token response: {}", e)))?;

        match (token.access_token, token.error) {
            (_, Some(error)) => Err(Error::source_unavailable(format!(
                "credentials rejected: {}",
                error
            ))),
            (Some(token), None) if !token.is_empty() => Ok(token),
            _ => Err(Error::source_unavailable(
                "credentials rejected: no access token issued",
            )),
        }
    }

    /// API URL for `segments`, each percent-encoded as one path segment
    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let base = &self.config.api_url;
        let mut url = Url::parse(base)
            .map_err(|e| Error::config(format!("Invalid Reddit API URL {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("Reddit API URL {} cannot take a path", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, token: &str, channel: &str) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::source_unavailable(format!("Reddit unreachable: {}", e)))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(Error::channel_not_found(channel)),
            StatusCode::FORBIDDEN => Err(Error::source_unavailable(format!(
                "r/{} is private or quarantined",
                channel
            ))),
            status => Err(Error::source_unavailable(format!(
                "Reddit returned {} for r/{}",
                status, channel
            ))),
        }
    }

    async fn ensure_exists(&self, channel: &str, token: &str) -> Result<()> {
        let url = self.api_url(&["r", channel, "about"])?;
        let about: Thing<serde_json::Value> = self
            .get(url, token, channel)
            .await?
            .json()
            .await
            .map_err(|_| Error::channel_not_found(channel))?;

        if about.kind != "t5" {
            return Err(Error::channel_not_found(channel));
        }
        Ok(())
    }

    async fn fetch_page(
        &self,
        channel: &str,
        token: &str,
        after: Option<&str>,
    ) -> Result<Listing> {
        let mut url = self.api_url(&["r", channel, "new"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", &self.config.page_size.clamp(1, 100).to_string())
                .append_pair("raw_json", "1");
            if let Some(after) = after {
                query.append_pair("after", after);
            }
        }

        let page: Thing<Listing> = self
            .get(url, token, channel)
            .await?
            .json()
            .await
            .map_err(|e| Error::source_unavailable(format!("Malformed listing page: {}", e)))?;

        Ok(page.data)
    }
}

fn to_post(submission: Submission) -> Result<Post> {
    let secs = submission.created_utc.trunc() as i64;
    let nanos = (submission.created_utc.fract() * 1e9) as u32;
    let created_at = DateTime::from_timestamp(secs, nanos).ok_or_else(|| {
        Error::source_unavailable(format!(
            "Invalid created_utc {} on post {:?}",
            submission.created_utc, submission.title
        ))
    })?;

    let link = if submission.url.is_empty() {
        format!("{}{}", REDDIT_WEB, submission.permalink)
    } else {
        submission.url
    };

    Ok(Post::new(submission.title, link, created_at))
}

#[async_trait]
impl PostSource for RedditSource {
    async fn fetch(&self, requested: &str) -> Result<Vec<Post>> {
        let channel = normalize_channel(requested);
        if channel.is_empty() {
            return Err(Error::channel_not_found(requested));
        }

        let token = self.access_token().await?;
        self.ensure_exists(channel, &token).await?;

        let mut posts = Vec::new();
        let mut after: Option<String> = None;
        let mut page_number = 0usize;

        loop {
            let page = self.fetch_page(channel, &token, after.as_deref()).await?;
            page_number += 1;
            debug!(
                page = page_number,
                posts = page.children.len(),
                after = ?page.after,
                "fetched listing page for r/{}",
                channel
            );

            if page.children.is_empty() {
                break;
            }
            for child in page.children {
                posts.push(to_post(child.data)?);
            }

            match page.after {
                Some(cursor) if !cursor.is_empty() => after = Some(cursor),
                _ => break,
            }
        }

        info!("Gathered {} headlines from r/{}", posts.len(), channel);
        Ok(newest_first(posts))
    }

    fn name(&self) -> &str {
        "reddit"
    }
}
