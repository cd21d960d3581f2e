//! Post source trait

use async_trait::async_trait;
use headline_core::{Post, Result};

/// Trait for forum post collectors
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch every post currently listed in `channel`, newest first.
    ///
    /// Fails with `ChannelNotFound` when the channel does not exist and
    /// `SourceUnavailable` when the forum cannot be reached or rejects the
    /// credentials. No partial list is returned on failure.
    async fn fetch(&self, channel: &str) -> Result<Vec<Post>>;

    /// Get the source name
    fn name(&self) -> &str;
}
