//! Confluence REST API integration.
//!
//! Provides a synchronous HTTP client for the Confluence Server REST API
//! with HTTP Basic or TLS client certificate authentication, and a posting
//! loop that upserts converted documents under a configured parent page.

mod client;
mod credentials;
mod error;
mod poster;
mod types;

pub use client::ConfluenceClient;
pub use credentials::Credentials;
pub use error::ConfluenceError;
pub use poster::{ConfluencePoster, FailedPost, PostReport};
pub use types::{Page, Version};
