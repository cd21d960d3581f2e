//! Headline Source
//!
//! Collectors that retrieve every current post of a named forum channel.
//! [`RedditSource`] talks to the Reddit OAuth API; anything implementing
//! [`PostSource`] can stand in for it.

pub mod config;
pub mod reddit;
pub mod source;
mod wire;

pub use config::RedditConfig;
pub use reddit::{normalize_channel, RedditSource};
pub use source::PostSource;
