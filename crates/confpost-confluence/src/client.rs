//! Confluence REST API client.
//!
//! Synchronous client for the Confluence Server REST API. Page content is
//! always sent in the `storage` representation.

use std::fs;
use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::json;
use tracing::{debug, info};
use ureq::Agent;
use ureq::tls::{Certificate, ClientCert, PemItem, PrivateKey, TlsConfig};

use crate::credentials::Credentials;
use crate::error::ConfluenceError;
use crate::types::{Page, SearchResults};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: Option<String>,
}

impl ConfluenceClient {
    /// Create a client for the given server using the resolved credentials.
    ///
    /// Basic credentials become an `Authorization` header; a key/cert pair
    /// becomes a TLS client certificate on the agent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Tls`] if the key or certificate files
    /// cannot be loaded.
    pub fn new(base_url: &str, credentials: &Credentials) -> Result<Self, ConfluenceError> {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false);

        let (config, auth_header) = match credentials {
            Credentials::Basic { username, password } => {
                let token = BASE64_STANDARD.encode(format!("{username}:{password}"));
                (config.build(), Some(format!("Basic {token}")))
            }
            Credentials::KeyCert { key, cert } => {
                let cert_pem = fs::read(cert)?;
                let key_pem = fs::read(key)?;
                let certificate = Certificate::from_pem(&cert_pem)
                    .map_err(|e| ConfluenceError::Tls(e.to_string()))?;
                let private_key = PrivateKey::from_pem(&key_pem)
                    .map_err(|e| ConfluenceError::Tls(e.to_string()))?;
                let tls = TlsConfig::builder()
                    .client_cert(Some(ClientCert::new_with_certs(&[certificate], private_key)))
                    .build();
                (config.tls_config(tls).build(), None)
            }
        };

        Ok(Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header,
        })
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Find the id of the page with the given title in a space.
    ///
    /// Used to resolve the parent page all documents are upserted under.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::ParentPageNotFound`] when no page matches.
    pub fn get_page_id(&self, space_key: &str, title: &str) -> Result<String, ConfluenceError> {
        debug!("Looking up page id for {title:?} in space {space_key}");
        let page = self.find_page(space_key, title)?;
        page.map(|page| page.id)
            .ok_or_else(|| ConfluenceError::ParentPageNotFound {
                title: title.to_owned(),
                space_key: space_key.to_owned(),
            })
    }

    /// Create the page if absent, update it otherwise (keyed by title).
    ///
    /// New pages are created under `parent_id`; updates bump the version.
    pub fn update_or_create(
        &self,
        space_key: &str,
        parent_id: &str,
        title: &str,
        body: &str,
    ) -> Result<Page, ConfluenceError> {
        match self.find_page(space_key, title)? {
            Some(page) => {
                let version = page.version.map_or(1, |v| v.number);
                self.update_page(&page.id, title, body, version)
            }
            None => self.create_page(space_key, parent_id, title, body),
        }
    }

    /// Look up a page by space key and title, with version expansion.
    fn find_page(&self, space_key: &str, title: &str) -> Result<Option<Page>, ConfluenceError> {
        let url = format!(
            "{}/content?type=page&spaceKey={}&title={}&expand=version",
            self.api_url(),
            utf8_percent_encode(space_key, NON_ALPHANUMERIC),
            utf8_percent_encode(title, NON_ALPHANUMERIC),
        );

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(auth) = &self.auth_header {
            request = request.header("Authorization", auth);
        }
        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let results: SearchResults = body_reader.read_json()?;
        Ok(results.results.into_iter().next())
    }

    /// Create a new page under the parent.
    fn create_page(
        &self,
        space_key: &str,
        parent_id: &str,
        title: &str,
        body: &str,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());
        let payload = create_payload(space_key, parent_id, title, body);

        info!("Creating page {title:?} under {parent_id}");
        self.send_json("POST", &url, &payload)
    }

    /// Update an existing page, incrementing its version.
    fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);
        let payload = update_payload(title, body, version + 1);

        info!("Updating page {page_id} from version {version} to {}", version + 1);
        self.send_json("PUT", &url, &payload)
    }

    /// Send a JSON payload and parse the page from the response.
    fn send_json(
        &self,
        method: &str,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<Page, ConfluenceError> {
        let payload_bytes = serde_json::to_vec(payload)?;

        let mut request = if method == "PUT" {
            self.agent.put(url)
        } else {
            self.agent.post(url)
        };
        request = request
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(auth) = &self.auth_header {
            request = request.header("Authorization", auth);
        }
        let response = request.send(&payload_bytes[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }
}

/// JSON payload for page creation.
fn create_payload(
    space_key: &str,
    parent_id: &str,
    title: &str,
    body: &str,
) -> serde_json::Value {
    json!({
        "type": "page",
        "title": title,
        "space": {"key": space_key},
        "ancestors": [{"id": parent_id}],
        "body": {
            "storage": {
                "value": body,
                "representation": "storage"
            }
        }
    })
}

/// JSON payload for a page update to the given version.
fn update_payload(title: &str, body: &str, next_version: u32) -> serde_json::Value {
    json!({
        "type": "page",
        "title": title,
        "body": {
            "storage": {
                "value": body,
                "representation": "storage"
            }
        },
        "version": {"number": next_version}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_payload_uses_storage_representation_and_ancestors() {
        let payload = create_payload("DOC", "42", "My Page", "<p>body</p>");
        assert_eq!(payload["type"], "page");
        assert_eq!(payload["space"]["key"], "DOC");
        assert_eq!(payload["ancestors"][0]["id"], "42");
        assert_eq!(payload["body"]["storage"]["representation"], "storage");
        assert_eq!(payload["body"]["storage"]["value"], "<p>body</p>");
    }

    #[test]
    fn update_payload_carries_the_next_version() {
        let payload = update_payload("My Page", "<p>body</p>", 5);
        assert_eq!(payload["version"]["number"], 5);
        assert_eq!(payload["title"], "My Page");
        assert_eq!(payload["body"]["storage"]["representation"], "storage");
    }
}
