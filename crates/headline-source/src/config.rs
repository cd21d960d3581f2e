//! Reddit API configuration

use serde::{Deserialize, Serialize};

/// Reddit API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// OAuth application id (`REDDIT_CLIENT_ID`)
    #[serde(default)]
    pub client_id: String,

    /// OAuth application secret (`REDDIT_CLIENT_SECRET`)
    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL of the token endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Base URL of the authenticated API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Posts requested per listing page (Reddit caps this at 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_user_agent() -> String {
    "Sentiment Analyzer 1.0".to_string()
}

fn default_auth_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_api_url() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

impl RedditConfig {
    /// Whether both OAuth credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: default_user_agent(),
            auth_url: default_auth_url(),
            api_url: default_api_url(),
            page_size: default_page_size(),
        }
    }
}
