//! Posting loop for converted documents.

use confpost_core::Document;
use tracing::{debug, error, info};

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;

/// Posts converted documents to a Confluence space.
///
/// Each document is upserted by title under the parent page resolved from
/// the configured space/space-key pair. Failures are logged with full
/// context and the loop continues with the next document.
pub struct ConfluencePoster<'a> {
    client: &'a ConfluenceClient,
    space: String,
    space_key: String,
}

/// A document that failed to post.
#[derive(Clone, Debug)]
pub struct FailedPost {
    /// Page title of the failed document.
    pub title: String,
    /// Rendered error description.
    pub error: String,
}

/// Outcome of a posting run.
#[derive(Clone, Debug, Default)]
pub struct PostReport {
    /// Titles posted successfully, in input order.
    pub posted: Vec<String>,
    /// Documents that failed, in input order.
    pub failed: Vec<FailedPost>,
}

impl<'a> ConfluencePoster<'a> {
    /// Create a poster targeting the given space.
    ///
    /// `space` is the title of the parent page; `space_key` the key of the
    /// space it lives in.
    #[must_use]
    pub fn new(client: &'a ConfluenceClient, space: &str, space_key: &str) -> Self {
        Self {
            client,
            space: space.to_owned(),
            space_key: space_key.to_owned(),
        }
    }

    /// Upsert every present document, skipping absent entries.
    pub fn post_all(&self, documents: &[Option<Document>]) -> PostReport {
        let mut report = PostReport::default();
        for document in documents.iter().flatten() {
            info!("Posting file: {}", document.title);
            match self.post_one(document) {
                Ok(()) => report.posted.push(document.title.clone()),
                Err(err) => {
                    log_post_failure(&err, &document.content);
                    report.failed.push(FailedPost {
                        title: document.title.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }

    fn post_one(&self, document: &Document) -> Result<(), ConfluenceError> {
        debug!(
            "Attempting to get page ID for space {} and space key {}",
            self.space, self.space_key
        );
        let parent_id = self.client.get_page_id(&self.space_key, &self.space)?;
        debug!("Page ID found {parent_id}");

        self.client.update_or_create(
            &self.space_key,
            &parent_id,
            &document.title,
            &document.content,
        )?;
        Ok(())
    }
}

/// Log a failed post with the full processed content for diagnosis.
fn log_post_failure(err: &ConfluenceError, content: &str) {
    match err {
        ConfluenceError::HttpResponse { status, body } => {
            error!(
                "Status code {status} received with message\n{body}.\nProcessed content is: {content}"
            );
        }
        other => {
            error!("Posting failed: {other}.\nProcessed content is: {content}");
        }
    }
}
