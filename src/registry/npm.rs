use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::models::ContentId;
use crate::registry::{PackageRecord, PackageRegistry};

const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
const NPM_PACKAGE_PAGE_URL: &str = "https://www.npmjs.com/package";

/// Looks packages up in the npm registry.
pub struct NpmRegistry {
    client: Client,
    base_url: String,
}

impl NpmRegistry {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Point the lookup at a different registry endpoint (tests).
    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        NpmRegistry {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    async fn lookup_package(&self, id: &ContentId) -> Result<Option<PackageRecord>> {
        // npm registry endpoint: GET /{name}/{version}
        // Scoped packages need URL encoding: @scope/pkg → %40scope%2Fpkg
        let npm_name = npm_package_name(id);
        let encoded_name = npm_name.replace('@', "%40").replace('/', "%2F");
        let url = format!("{}/{}/{}", self.base_url, encoded_name, id.version);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "license-reviewr/0.1.0")
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let data: serde_json::Value = response.json().await?;

        let license = data
            .get("license")
            .and_then(|l| l.as_str())
            .map(str::to_string);

        let distribution_url = data
            .get("dist")
            .and_then(|d| d.get("tarball"))
            .and_then(|t| t.as_str())
            .map(str::to_string);

        let repository_url = data
            .get("repository")
            .and_then(|r| r.get("url"))
            .and_then(|u| u.as_str())
            .map(normalize_repository_url);

        let source_url = repository_url
            .as_deref()
            .and_then(|repo| github_tree_url(repo, &id.version));

        Ok(Some(PackageRecord {
            url: format!("{}/{}/v/{}", NPM_PACKAGE_PAGE_URL, npm_name, id.version),
            license,
            distribution_url,
            repository_url,
            source_url,
        }))
    }
}

/// The package name as npm knows it: `namespace/name`, with the `-`
/// placeholder namespace omitted entirely.
pub fn npm_package_name(id: &ContentId) -> String {
    if id.has_namespace() {
        format!("{}/{}", id.namespace, id.name)
    } else {
        id.name.clone()
    }
}

/// Strip the VCS decorations npm manifests carry (`git+...`, `.git` suffix).
fn normalize_repository_url(url: &str) -> String {
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.to_string()
}

/// Derive a browsable source tree link for GitHub-hosted repositories.
fn github_tree_url(repository_url: &str, version: &str) -> Option<String> {
    if repository_url.contains("github.com") {
        Some(format!("{}/tree/v{}", repository_url, version))
    } else {
        None
    }
}
