//! Layered settings: optional YAML file, then `HEADLINE__*` environment

use headline_classifiers::ClassifierSettings;
use headline_core::{Error, Result};
use headline_source::RedditConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "HEADLINE";
pub const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
pub const ENV_HF_TOKEN: &str = "HF_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Directory reports are written to
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reddit: RedditConfig::default(),
            classifier: ClassifierSettings::default(),
            report_dir: default_report_dir(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (may be absent) layered under the environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should apply.
    pub fn load(path: &Path) -> Result<Self> {
        let layered = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut settings: Settings = layered
            .try_deserialize()
            .map_err(|e| Error::config(format!("Invalid settings: {}", e)))?;

        settings.fill_credentials(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Fill credentials the settings layers left empty from well-known variables
    pub fn fill_credentials<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.reddit.client_id.trim().is_empty() {
            if let Some(id) = lookup(ENV_CLIENT_ID) {
                self.reddit.client_id = id;
            }
        }
        if self.reddit.client_secret.trim().is_empty() {
            if let Some(secret) = lookup(ENV_CLIENT_SECRET) {
                self.reddit.client_secret = secret;
            }
        }
        if self.classifier.api_token.is_none() {
            self.classifier.api_token = lookup(ENV_HF_TOKEN).filter(|t| !t.is_empty());
        }
    }
}
