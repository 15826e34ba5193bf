//! Session credential resolution.

use std::path::PathBuf;

use crate::error::ConfluenceError;

/// Authentication material for a Confluence session.
///
/// Exactly one of the two pairs must be supplied: a service account
/// username/password, or a TLS client key/certificate registered with the
/// server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic authentication.
    Basic {
        username: String,
        password: String,
    },
    /// TLS client certificate authentication.
    KeyCert {
        /// PEM private key file.
        key: PathBuf,
        /// PEM certificate file.
        cert: PathBuf,
    },
}

impl Credentials {
    /// Resolve credentials from the optional CLI inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::InvalidCredentials`] unless exactly one
    /// complete pair is present. Called before any file processing so that
    /// misconfiguration fails fast.
    pub fn resolve(
        username: Option<String>,
        password: Option<String>,
        key: Option<PathBuf>,
        cert: Option<PathBuf>,
    ) -> Result<Self, ConfluenceError> {
        match (username, password, key, cert) {
            (Some(username), Some(password), None, None) => {
                Ok(Self::Basic { username, password })
            }
            (None, None, Some(key), Some(cert)) => Ok(Self::KeyCert { key, cert }),
            _ => Err(ConfluenceError::InvalidCredentials(
                "provide either username and password, or SSL key and certificate".to_owned(),
            )),
        }
    }
}
