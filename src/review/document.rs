use crate::models::{ContentId, ContentSource, ReviewItem};
use crate::registry::{PackageRegistry, RemoteCheck};
use crate::review::search::ipzilla_search_url;

/// Label attached to every review request issue.
pub const REVIEW_LABEL: &str = "Review Needed";

const MAVEN_CENTRAL_ARTIFACT_URL: &str = "https://search.maven.org/artifact";
const MAVEN_CENTRAL_CONTENT_URL: &str = "https://search.maven.org/remotecontent?filepath=";

/// A fully rendered review request, ready for the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDocument {
    /// Canonical identity string; the deduplication key.
    pub title: String,
    pub labels: Vec<String>,
    pub body: String,
}

/// Renders one content item's license data into a [`ReviewDocument`].
///
/// Building never fails: the registry lookup and the source-archive probe are
/// best-effort, and a lookup that errors or comes back empty just leaves its
/// section out of the body.
pub struct DocumentBuilder<'a> {
    project: &'a str,
    registry: &'a dyn PackageRegistry,
    remote: &'a dyn RemoteCheck,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(
        project: &'a str,
        registry: &'a dyn PackageRegistry,
        remote: &'a dyn RemoteCheck,
    ) -> Self {
        DocumentBuilder {
            project,
            registry,
            remote,
        }
    }

    pub async fn build(&self, item: &ReviewItem) -> ReviewDocument {
        ReviewDocument {
            title: item.id.to_string(),
            labels: vec![REVIEW_LABEL.to_string()],
            body: self.render_body(item).await,
        }
    }

    async fn render_body(&self, item: &ReviewItem) -> String {
        let id = &item.id;
        let mut body = String::new();

        body.push_str(&format!("{}\n\n", id));
        body.push_str(&format!("Project: {}\n", self.project));

        for assertion in &item.assertions {
            body.push('\n');
            match &assertion.url {
                Some(url) => body.push_str(&format!("[{}]({})\n", assertion.authority, url)),
                None => body.push_str(&format!("{}\n", assertion.authority)),
            }
            body.push_str(&format!(
                "  - Declared: {} ({})\n",
                assertion.license, assertion.score
            ));
            for license in &assertion.discovered {
                body.push_str(&format!("  - Discovered: {}\n", license));
            }
        }

        if let Some(url) = ipzilla_search_url(id) {
            body.push('\n');
            body.push_str(&format!("[Search IPZilla]({})\n", url));
        }

        if let Some(url) = maven_central_url(id) {
            body.push('\n');
            body.push_str(&format!("[Maven Central]({})\n", url));

            if let Some(source) = self.verified_maven_source_url(id).await {
                body.push_str(&format!("  - [Source]({}) from Maven Central\n", source));
            }
        }

        // Capture whatever the npm registry knows, whichever registry the
        // identity itself came from.
        if let Ok(Some(package)) = self.registry.lookup_package(id).await {
            body.push('\n');
            body.push_str(&format!("[npmjs.com]({})\n", package.url));
            if let Some(license) = &package.license {
                body.push_str(&format!("  - License: {}\n", license));
            }
            if let Some(url) = &package.distribution_url {
                body.push_str(&format!("  - [Distribution]({})\n", url));
            }
            if let Some(url) = &package.repository_url {
                body.push_str(&format!("  - [Repository]({})\n", url));
            }
            if let Some(url) = &package.source_url {
                body.push_str(&format!("  - [Source]({})\n", url));
            }
        }

        body
    }

    async fn verified_maven_source_url(&self, id: &ContentId) -> Option<String> {
        let url = maven_central_source_url(id)?;
        if self.remote.remote_file_exists(&url).await {
            Some(url)
        } else {
            None
        }
    }
}

/// Artifact browse page on Maven Central, for maven-central identities only.
pub fn maven_central_url(id: &ContentId) -> Option<String> {
    if id.source != ContentSource::MavenCentral {
        return None;
    }

    Some(format!(
        "{}/{}/{}/{}/jar",
        MAVEN_CENTRAL_ARTIFACT_URL, id.namespace, id.name, id.version
    ))
}

/// Candidate sources-jar URL on Maven Central. The file does not exist for
/// every artifact, so callers must verify before linking it.
pub fn maven_central_source_url(id: &ContentId) -> Option<String> {
    if id.source != ContentSource::MavenCentral {
        return None;
    }

    let group_path = id.namespace.replace('.', "/");
    Some(format!(
        "{}{}/{}/{}/{}-{}-sources.jar",
        MAVEN_CENTRAL_CONTENT_URL, group_path, id.name, id.version, id.name, id.version
    ))
}
