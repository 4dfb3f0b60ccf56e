//! GitHub contents-API implementation of [`ContentStore`].
//!
//! One blocking request per operation. A GET answers with an envelope whose
//! `content` field is base64 text; a PUT upserts with an explicit commit
//! message and branch. The store's content version token (`sha`) is
//! surfaced on reads and required back on updates — callers pass it through
//! untouched.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use otasync_core::SyncConfig;

use crate::error::StoreError;
use crate::store::{ContentStore, RemoteFile};

/// Response envelope for a contents-API read.
///
/// The API returns many more fields; only the two the sync needs are kept.
#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    sha: Option<String>,
}

/// Request body for a contents-API upsert.
#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Blocking GitHub contents-API client.
pub struct GithubStore {
    agent: ureq::Agent,
    base: String,
    branch: String,
    auth: String,
}

impl GithubStore {
    pub fn new(cfg: &SyncConfig) -> Self {
        Self {
            agent: ureq::Agent::new(),
            base: format!(
                "https://api.github.com/repos/{}/{}/contents",
                cfg.owner, cfg.repo
            ),
            branch: cfg.branch.clone(),
            auth: format!("Bearer {}", cfg.token.as_str()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

impl ContentStore for GithubStore {
    fn read(&self, path: &str) -> Result<Option<RemoteFile>, StoreError> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let response = match self
            .agent
            .get(&url)
            .set("Authorization", &self.auth)
            .set("Accept", "application/vnd.github.v3+json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(ureq::Error::Status(status, _)) => {
                return Err(StoreError::Status {
                    path: path.to_owned(),
                    status,
                })
            }
            Err(err) => {
                return Err(StoreError::Request {
                    path: path.to_owned(),
                    source: Box::new(err),
                })
            }
        };

        let envelope: ContentEnvelope =
            response
                .into_json()
                .map_err(|source| StoreError::Envelope {
                    path: path.to_owned(),
                    source,
                })?;
        let content = decode_content(path, envelope.content.as_deref().unwrap_or(""))?;
        Ok(Some(RemoteFile {
            content,
            sha: envelope.sha,
        }))
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        message: &str,
        prior_sha: Option<&str>,
    ) -> Result<(), StoreError> {
        let url = self.url(path);
        tracing::debug!("PUT {url}");
        let encoded = general_purpose::STANDARD.encode(content);
        let body = UpsertRequest {
            message,
            content: &encoded,
            branch: &self.branch,
            sha: prior_sha,
        };
        self.agent
            .put(&url)
            .set("Authorization", &self.auth)
            .set("Accept", "application/vnd.github.v3+json")
            .send_json(&body)
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => StoreError::Status {
                    path: path.to_owned(),
                    status,
                },
                err => StoreError::Request {
                    path: path.to_owned(),
                    source: Box::new(err),
                },
            })?;
        Ok(())
    }
}

/// Decode a contents-API base64 payload to text.
///
/// The API wraps base64 at column 60; embedded whitespace must be stripped
/// before decoding.
fn decode_content(path: &str, raw: &str) -> Result<String, StoreError> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|source| StoreError::Base64 {
            path: path.to_owned(),
            source,
        })?;
    String::from_utf8(bytes).map_err(|_| StoreError::Utf8 {
        path: path.to_owned(),
    })
}
