use serde::{Deserialize, Serialize};

/// Identifies one piece of third-party content under review.
///
/// The canonical string form (`Display`) doubles as the title of the review
/// issue, which makes it the deduplication key against the tracker: it is
/// derived from the identity alone, never from license data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentId {
    /// Group/scope segment. `"-"` is the placeholder for "no namespace".
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub source: ContentSource,
}

impl ContentId {
    pub fn new(namespace: &str, name: &str, version: &str, source: ContentSource) -> Self {
        ContentId {
            namespace: namespace.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            source,
        }
    }

    /// Whether this identity is complete enough to submit for review.
    pub fn is_valid(&self) -> bool {
        !self.namespace.is_empty()
            && !self.name.is_empty()
            && !self.version.is_empty()
            && self.source != ContentSource::Unknown
    }

    pub fn has_namespace(&self) -> bool {
        self.namespace != "-"
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.source, self.namespace, self.name, self.version
        )
    }
}

/// The registry a content identity was resolved against. Tags we do not
/// recognize deserialize as [`ContentSource::Unknown`], which makes the
/// carrying identity invalid rather than failing the whole summary parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ContentSource {
    MavenCentral,
    Npmjs,
    Unknown,
}

impl From<String> for ContentSource {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "mavencentral" => ContentSource::MavenCentral,
            "npmjs" => ContentSource::Npmjs,
            _ => ContentSource::Unknown,
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::MavenCentral => write!(f, "mavencentral"),
            ContentSource::Npmjs => write!(f, "npmjs"),
            ContentSource::Unknown => write!(f, "unknown"),
        }
    }
}

/// One authority's observation of a license for a content identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseAssertion {
    /// Name of the authority that produced this observation.
    pub authority: String,
    /// Link to the authority's record for this content, if it has one.
    #[serde(default)]
    pub url: Option<String>,
    /// Declared license expression, e.g. `Apache-2.0`.
    pub license: String,
    /// Authority-reported confidence score.
    pub score: u32,
    /// License expressions the authority discovered independently of the
    /// declaration. Only some authorities supply these.
    #[serde(default)]
    pub discovered: Vec<String>,
}

/// One content item awaiting review: its identity plus every license
/// assertion collected for it, in authority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: ContentId,
    #[serde(default)]
    pub assertions: Vec<LicenseAssertion>,
}

/// What happened to one item during batch submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// An open review with the same title was already on the tracker.
    AlreadyExists(String),
    /// A new review issue was created; carries its web URL.
    Created(String),
    /// The item was not submitted (e.g. invalid identity).
    Skipped(String),
    /// A tracker call failed; the batch halted here.
    Failed(String),
}

impl std::fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionOutcome::AlreadyExists(_) => write!(f, "existing"),
            SubmissionOutcome::Created(_) => write!(f, "created"),
            SubmissionOutcome::Skipped(_) => write!(f, "skipped"),
            SubmissionOutcome::Failed(_) => write!(f, "failed"),
        }
    }
}

/// Accumulated outcomes for one submission run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(ContentId, SubmissionOutcome)>,
}

impl BatchReport {
    pub fn record(&mut self, id: &ContentId, outcome: SubmissionOutcome) {
        self.outcomes.push((id.clone(), outcome));
    }

    pub fn created_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SubmissionOutcome::Created(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, o)| matches!(o, SubmissionOutcome::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maven_id() -> ContentId {
        ContentId::new("org.example", "lib", "1.0", ContentSource::MavenCentral)
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(maven_id().to_string(), "mavencentral/org.example/lib/1.0");
        let npm = ContentId::new("-", "left-pad", "1.0.0", ContentSource::Npmjs);
        assert_eq!(npm.to_string(), "npmjs/-/left-pad/1.0.0");
    }

    #[test]
    fn test_validity() {
        assert!(maven_id().is_valid());
        assert!(!ContentId::new("org.example", "", "1.0", ContentSource::MavenCentral).is_valid());
        assert!(!ContentId::new("org.example", "lib", "", ContentSource::MavenCentral).is_valid());
        assert!(!ContentId::new("a", "b", "1.0", ContentSource::Unknown).is_valid());
        // Placeholder namespace is still a namespace.
        assert!(ContentId::new("-", "left-pad", "1.0.0", ContentSource::Npmjs).is_valid());
    }

    #[test]
    fn test_source_deserializes_wire_tags() {
        let id: ContentId = serde_json::from_str(
            r#"{"namespace":"-","name":"left-pad","version":"1.0.0","source":"npmjs"}"#,
        )
        .unwrap();
        assert_eq!(id.source, ContentSource::Npmjs);

        let id: ContentId = serde_json::from_str(
            r#"{"namespace":"org.example","name":"lib","version":"1.0","source":"mavencentral"}"#,
        )
        .unwrap();
        assert_eq!(id.source, ContentSource::MavenCentral);

        let id: ContentId = serde_json::from_str(
            r#"{"namespace":"a","name":"b","version":"1","source":"somethingelse"}"#,
        )
        .unwrap();
        assert_eq!(id.source, ContentSource::Unknown);
    }

    #[test]
    fn test_report_counters() {
        let mut report = BatchReport::default();
        report.record(&maven_id(), SubmissionOutcome::Created("url".into()));
        report.record(&maven_id(), SubmissionOutcome::Skipped("invalid".into()));
        assert_eq!(report.created_count(), 1);
        assert!(!report.has_failures());
        report.record(&maven_id(), SubmissionOutcome::Failed("boom".into()));
        assert!(report.has_failures());
    }
}
