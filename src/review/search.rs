use crate::models::ContentId;

const IPZILLA_SEARCH_URL: &str =
    "https://dev.eclipse.org/ipzilla/buglist.cgi?short_desc_type=anywords&short_desc=";

/// Build an IPZilla search URL over the terms an identity suggests, or `None`
/// when no useful terms can be derived.
///
/// Terms are the package name plus the namespace (and its last segment, for
/// dotted Maven-style group ids), deduplicated in order of specificity.
pub fn ipzilla_search_url(id: &ContentId) -> Option<String> {
    let mut terms: Vec<&str> = Vec::new();

    if !id.name.is_empty() {
        terms.push(&id.name);
    }
    if id.has_namespace() && !id.namespace.is_empty() {
        terms.push(&id.namespace);
        if let Some(last) = id.namespace.rsplit('.').next() {
            if !terms.contains(&last) {
                terms.push(last);
            }
        }
    }

    if terms.is_empty() {
        return None;
    }

    let query = terms
        .iter()
        .map(|term| urlencoding::encode(term).into_owned())
        .collect::<Vec<_>>()
        .join("+");

    Some(format!("{}{}", IPZILLA_SEARCH_URL, query))
}
