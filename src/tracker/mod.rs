//! The issue tracker the review requests are submitted to.

pub mod gitlab;

use async_trait::async_trait;

/// A tracked review issue, as the tracker reports it back to us.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRef {
    /// Human-viewable URL of the issue.
    pub web_url: String,
}

/// Minimal tracker surface the submission loop needs: look an open issue up
/// by its exact title, and create one.
#[async_trait]
pub trait Tracker: Send + Sync {
    async fn find_by_title(&self, title: &str) -> anyhow::Result<Option<IssueRef>>;
    async fn create(&self, title: &str, labels: &[String], body: &str) -> anyhow::Result<IssueRef>;
}
