use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::GitLabConfig;
use crate::tracker::{IssueRef, Tracker};

/// GitLab v4 REST client scoped to one project. Constructed once per batch
/// and dropped when the batch finishes.
pub struct GitLabTracker {
    client: Client,
    host: String,
    token: String,
    /// URL-encoded project path, e.g. `group%2Fproject`.
    project: String,
}

#[derive(Debug, Deserialize)]
struct GitLabIssue {
    title: String,
    web_url: String,
}

impl GitLabTracker {
    pub fn connect(client: Client, config: &GitLabConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(anyhow!(
                "no GitLab token configured (set gitlab.token or GITLAB_TOKEN)"
            ));
        }

        Ok(GitLabTracker {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            project: urlencoding::encode(&config.repository).into_owned(),
        })
    }

    fn issues_url(&self) -> String {
        format!("{}/api/v4/projects/{}/issues", self.host, self.project)
    }
}

#[async_trait]
impl Tracker for GitLabTracker {
    async fn find_by_title(&self, title: &str) -> Result<Option<IssueRef>> {
        let response = self
            .client
            .get(self.issues_url())
            .header("PRIVATE-TOKEN", &self.token)
            .query(&[("state", "opened"), ("in", "title"), ("search", title)])
            .send()
            .await
            .context("issue search request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("issue search returned {}", response.status()));
        }

        // The search matches substrings; we only dedup on the exact title.
        let issues: Vec<GitLabIssue> = response.json().await?;
        Ok(issues
            .into_iter()
            .find(|issue| issue.title == title)
            .map(|issue| IssueRef {
                web_url: issue.web_url,
            }))
    }

    async fn create(&self, title: &str, labels: &[String], body: &str) -> Result<IssueRef> {
        let response = self
            .client
            .post(self.issues_url())
            .header("PRIVATE-TOKEN", &self.token)
            .json(&serde_json::json!({
                "title": title,
                "labels": labels.join(","),
                "description": body,
            }))
            .send()
            .await
            .context("issue creation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("issue creation returned {}: {}", status, detail));
        }

        let issue: GitLabIssue = response.json().await?;
        Ok(IssueRef {
            web_url: issue.web_url,
        })
    }
}
