use std::io::Write;

use anyhow::Result;

use crate::models::{BatchReport, ReviewItem, SubmissionOutcome};
use crate::review::document::DocumentBuilder;
use crate::tracker::Tracker;

/// Upper bound on issues created in one run. Anything beyond it is left for
/// a future run and flagged by the trailing notice.
pub const MAX_REVIEWS_PER_RUN: usize = 5;

/// Drives one batch of review submissions against the tracker.
///
/// Items are processed strictly in input order, one at a time: both the
/// per-run cap and the halt-on-failure policy need a total order over
/// outcomes. Progress is streamed to `out` as each item is handled.
pub struct Submitter<'a> {
    builder: DocumentBuilder<'a>,
    tracker: &'a dyn Tracker,
}

impl<'a> Submitter<'a> {
    pub fn new(builder: DocumentBuilder<'a>, tracker: &'a dyn Tracker) -> Self {
        Submitter { builder, tracker }
    }

    /// Submit a review request for each item that does not already have one.
    ///
    /// There is no create-if-absent primitive on the tracker side, so the
    /// find-then-create pair can race with a concurrent run. Duplicate
    /// reviews are rare and cheap to close, so that race is accepted rather
    /// than synchronized away.
    ///
    /// A transport failure during either the lookup or the creation halts
    /// the whole batch: one failed call means the backend is not usable for
    /// the rest of the run, and nothing is retried.
    pub async fn submit(&self, items: &[ReviewItem], out: &mut dyn Write) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        let mut created = 0;
        let mut examined = 0;

        for item in items {
            examined += 1;
            writeln!(out, "Setting up a review for {}.", item.id)?;

            if !item.id.is_valid() {
                writeln!(out, " - Don't know what to do with this.")?;
                report.record(
                    &item.id,
                    SubmissionOutcome::Skipped("incomplete or unrecognized identity".to_string()),
                );
                continue;
            }

            let document = self.builder.build(item).await;

            match self.tracker.find_by_title(&document.title).await {
                Ok(Some(existing)) => {
                    writeln!(out, " - Existing: {}", existing.web_url)?;
                    report.record(&item.id, SubmissionOutcome::AlreadyExists(existing.web_url));
                    continue;
                }
                Ok(None) => {}
                Err(err) => {
                    writeln!(
                        out,
                        " - An error occurred while attempting to create a review request"
                    )?;
                    report.record(&item.id, SubmissionOutcome::Failed(err.to_string()));
                    break;
                }
            }

            match self
                .tracker
                .create(&document.title, &document.labels, &document.body)
                .await
            {
                Ok(issue) => {
                    writeln!(out, " - Created: {}", issue.web_url)?;
                    report.record(&item.id, SubmissionOutcome::Created(issue.web_url));
                    created += 1;
                }
                Err(err) => {
                    writeln!(
                        out,
                        " - An error occurred while attempting to create a review request"
                    )?;
                    report.record(&item.id, SubmissionOutcome::Failed(err.to_string()));
                    break;
                }
            }

            if created >= MAX_REVIEWS_PER_RUN {
                break;
            }
        }

        if examined < items.len() {
            writeln!(out)?;
            writeln!(out, "More content needs to be reviewed.")?;
            writeln!(
                out,
                "Only the first {} review requests are submitted in a single run.",
                MAX_REVIEWS_PER_RUN
            )?;
            writeln!(out)?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentId, ContentSource};
    use crate::registry::{PackageRecord, PackageRegistry, RemoteCheck};
    use crate::tracker::IssueRef;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct NoRegistry;

    #[async_trait]
    impl PackageRegistry for NoRegistry {
        async fn lookup_package(&self, _id: &ContentId) -> Result<Option<PackageRecord>> {
            Ok(None)
        }
    }

    struct NoRemote;

    #[async_trait]
    impl RemoteCheck for NoRemote {
        async fn remote_file_exists(&self, _url: &str) -> bool {
            false
        }
    }

    /// Records every tracker call; configurable existing titles and failures.
    #[derive(Default)]
    struct FakeTracker {
        existing: Vec<String>,
        fail_create_on: Option<String>,
        fail_find: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Tracker for FakeTracker {
        async fn find_by_title(&self, title: &str) -> Result<Option<IssueRef>> {
            self.calls.lock().unwrap().push(format!("find:{}", title));
            if self.fail_find {
                return Err(anyhow::anyhow!("search unavailable"));
            }
            Ok(self
                .existing
                .iter()
                .find(|t| t.as_str() == title)
                .map(|t| IssueRef {
                    web_url: format!("https://tracker.test/issues/{}", t),
                }))
        }

        async fn create(&self, title: &str, _labels: &[String], _body: &str) -> Result<IssueRef> {
            self.calls.lock().unwrap().push(format!("create:{}", title));
            if self.fail_create_on.as_deref() == Some(title) {
                return Err(anyhow::anyhow!("creation rejected"));
            }
            Ok(IssueRef {
                web_url: format!("https://tracker.test/issues/new/{}", title),
            })
        }
    }

    fn item(name: &str) -> ReviewItem {
        ReviewItem {
            id: ContentId::new("-", name, "1.0.0", ContentSource::Npmjs),
            assertions: vec![],
        }
    }

    fn invalid_item() -> ReviewItem {
        ReviewItem {
            id: ContentId::new("a", "b", "1.0", ContentSource::Unknown),
            assertions: vec![],
        }
    }

    async fn run(
        tracker: &FakeTracker,
        items: &[ReviewItem],
    ) -> (BatchReport, String) {
        let registry = NoRegistry;
        let remote = NoRemote;
        let builder = DocumentBuilder::new("my.project", &registry, &remote);
        let submitter = Submitter::new(builder, tracker);
        let mut out = Vec::new();
        let report = submitter.submit(items, &mut out).await.unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_identity_is_skipped_without_tracker_calls() {
        let tracker = FakeTracker::default();
        let (report, output) = run(&tracker, &[invalid_item(), item("pkg")]).await;

        assert!(output.contains(" - Don't know what to do with this."));
        // Only the valid item reached the tracker.
        let calls = tracker.calls.lock().unwrap();
        assert!(!calls.is_empty());
        assert!(calls.iter().all(|c| c.contains("pkg")));
        assert!(matches!(
            report.outcomes[0].1,
            SubmissionOutcome::Skipped(_)
        ));
        assert!(matches!(
            report.outcomes[1].1,
            SubmissionOutcome::Created(_)
        ));
    }

    #[tokio::test]
    async fn test_cap_stops_after_five_creations() {
        let tracker = FakeTracker::default();
        let items: Vec<ReviewItem> = (0..8).map(|i| item(&format!("pkg{}", i))).collect();
        let (report, output) = run(&tracker, &items).await;

        assert_eq!(report.created_count(), 5);
        assert_eq!(report.outcomes.len(), 5);

        let calls = tracker.calls.lock().unwrap();
        assert_eq!(calls.iter().filter(|c| c.starts_with("create:")).count(), 5);
        // pkg5 onward never reached the tracker.
        assert!(!calls.iter().any(|c| c.contains("pkg5")));

        assert!(output.contains("More content needs to be reviewed."));
    }

    #[tokio::test]
    async fn test_no_trailing_notice_when_batch_fits() {
        let tracker = FakeTracker::default();
        let items: Vec<ReviewItem> = (0..5).map(|i| item(&format!("pkg{}", i))).collect();
        let (report, output) = run(&tracker, &items).await;

        assert_eq!(report.created_count(), 5);
        assert!(!output.contains("More content needs to be reviewed."));
    }

    #[tokio::test]
    async fn test_existing_issue_short_circuits_creation() {
        let tracker = FakeTracker {
            existing: vec!["npmjs/-/pkg0/1.0.0".to_string()],
            ..Default::default()
        };
        let items: Vec<ReviewItem> = (0..6).map(|i| item(&format!("pkg{}", i))).collect();
        let (report, output) = run(&tracker, &items).await;

        assert!(output.contains(" - Existing: https://tracker.test/issues/npmjs/-/pkg0/1.0.0"));
        assert!(matches!(
            report.outcomes[0].1,
            SubmissionOutcome::AlreadyExists(_)
        ));

        // The dedup hit does not count against the cap: the remaining five
        // all get created.
        assert_eq!(report.created_count(), 5);
        let calls = tracker.calls.lock().unwrap();
        assert!(!calls.iter().any(|c| c == "create:npmjs/-/pkg0/1.0.0"));
    }

    #[tokio::test]
    async fn test_creation_failure_halts_batch() {
        let tracker = FakeTracker {
            fail_create_on: Some("npmjs/-/pkg1/1.0.0".to_string()),
            ..Default::default()
        };
        let items: Vec<ReviewItem> = (0..4).map(|i| item(&format!("pkg{}", i))).collect();
        let (report, output) = run(&tracker, &items).await;

        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            report.outcomes[0].1,
            SubmissionOutcome::Created(_)
        ));
        assert!(matches!(report.outcomes[1].1, SubmissionOutcome::Failed(_)));
        assert!(report.has_failures());
        assert!(output.contains("An error occurred while attempting to create a review request"));

        // pkg2 and pkg3 were never attempted.
        let calls = tracker.calls.lock().unwrap();
        assert!(!calls.iter().any(|c| c.contains("pkg2") || c.contains("pkg3")));
    }

    #[tokio::test]
    async fn test_find_failure_is_fatal_too() {
        let tracker = FakeTracker {
            fail_find: true,
            ..Default::default()
        };
        let (report, _) = run(&tracker, &[item("pkg0"), item("pkg1")]).await;

        assert_eq!(report.outcomes.len(), 1);
        assert!(matches!(report.outcomes[0].1, SubmissionOutcome::Failed(_)));
        let calls = tracker.calls.lock().unwrap();
        assert!(!calls.iter().any(|c| c.starts_with("create:")));
        assert!(!calls.iter().any(|c| c.contains("pkg1")));
    }

    #[tokio::test]
    async fn test_progress_line_precedes_every_outcome() {
        let tracker = FakeTracker::default();
        let (_, output) = run(&tracker, &[invalid_item(), item("pkg")]).await;

        assert!(output.starts_with("Setting up a review for unknown/a/b/1.0.\n"));
        assert!(output.contains("Setting up a review for npmjs/-/pkg/1.0.0.\n"));
    }
}
