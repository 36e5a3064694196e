//! Auxiliary lookups used to enrich review documents.
//!
//! Everything here is best-effort: the document builder treats a failed or
//! empty lookup as "omit that section", so implementations report transport
//! problems through `Result` but callers never let them surface.

pub mod npm;

use async_trait::async_trait;

use crate::models::ContentId;

/// What a package registry knows about one package, beyond the license
/// assertions we already hold.
#[derive(Debug, Clone, Default)]
pub struct PackageRecord {
    /// Human-viewable package page.
    pub url: String,
    pub license: Option<String>,
    pub distribution_url: Option<String>,
    pub repository_url: Option<String>,
    pub source_url: Option<String>,
}

/// Registry-agnostic package lookup. Attempted for every identity regardless
/// of its own source tag.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn lookup_package(&self, id: &ContentId) -> anyhow::Result<Option<PackageRecord>>;
}

/// Probe whether a remote file exists, used to gate optional source-archive
/// links. Never fails; transport errors read as "does not exist".
#[async_trait]
pub trait RemoteCheck: Send + Sync {
    async fn remote_file_exists(&self, url: &str) -> bool;
}

/// [`RemoteCheck`] over a plain HEAD request.
pub struct HttpRemoteCheck {
    client: reqwest::Client,
}

impl HttpRemoteCheck {
    pub fn new(client: reqwest::Client) -> Self {
        HttpRemoteCheck { client }
    }
}

#[async_trait]
impl RemoteCheck for HttpRemoteCheck {
    async fn remote_file_exists(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
