//! DOI, ORCID and URL normalization.
//!
//! Every function here is total: an input that does not look like the
//! identifier in question yields `None`, which callers treat as "absent".

use crate::regex::Regex;
use once_cell::sync::Lazy;
use url::Url;

/// Resolver host every normalized DOI is re-prefixed with.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Resolver host every normalized ORCID is re-prefixed with.
pub const ORCID_RESOLVER: &str = "https://orcid.org/";

static DOI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:doi:\s*|(?:https?://)?(?:dx\.)?doi\.org/|(?:https?://)?handle\.(?:test\.)?datacite\.org/|(?:https?://)?identifiers\.org/doi/|urn:doi:)?(10\.\d{4,9}(?:\.\d+)*/\S+)$",
    )
    .unwrap()
});

static ORCID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:[hH][tT][tT][pP][sS]?://)?(?:www\.)?(?:sandbox\.)?orcid\.org/)?(\d{4}-\d{4}-\d{4}-\d{3}[0-9Xx])$",
    )
    .unwrap()
});

/// Shape of a bare identifier handed to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Doi,
    Orcid,
    Url,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IdentifierKind::Doi => "DOI",
            IdentifierKind::Orcid => "ORCID",
            IdentifierKind::Url => "URL",
        })
    }
}

/// Strips whitespace and any resolver prefix, returning the DOI as written.
///
/// Casing is preserved, so this is what a record stores as its literal `doi`.
///
/// ```
/// use bibmeta::identifier::doi_from_url;
///
/// assert_eq!(doi_from_url("https://doi.org/10.5438/4K3M-NYVG").as_deref(), Some("10.5438/4K3M-NYVG"));
/// ```
pub fn doi_from_url(input: &str) -> Option<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    DOI_REGEX
        .captures(&compact)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Returns the bare, lower-cased DOI.
pub fn validate_doi(input: &str) -> Option<String> {
    doi_from_url(input).map(|doi| doi.to_lowercase())
}

/// Canonical resolver URL for a DOI.
///
/// DOIs are case-insensitive, so the suffix is lower-cased. The result is a
/// fixed point: normalizing it again returns it unchanged.
///
/// ```
/// use bibmeta::identifier::normalize_doi;
///
/// assert_eq!(
///     normalize_doi("http://doi.org/10.5438/4K3M-NYVG").as_deref(),
///     Some("https://doi.org/10.5438/4k3m-nyvg")
/// );
/// assert_eq!(normalize_doi("not a doi"), None);
/// ```
pub fn normalize_doi(input: &str) -> Option<String> {
    validate_doi(input).map(|doi| format!("{DOI_RESOLVER}{doi}"))
}

/// Canonical resolver URL for an ORCID iD.
///
/// Unlike DOIs the check digit keeps its original casing.
pub fn normalize_orcid(input: &str) -> Option<String> {
    let trimmed = input.trim();
    ORCID_REGEX
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{ORCID_RESOLVER}{}", m.as_str()))
}

/// Canonical form of an absolute http(s) URL.
///
/// Scheme and host are lower-cased by the URL parser; the path is kept.
pub fn normalize_url(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url.to_string()),
        _ => None,
    }
}

/// Normalizes whatever a source offers as its primary identifier: a DOI if it
/// looks like one, an absolute URL otherwise.
pub fn normalize_id(input: &str) -> Option<String> {
    normalize_doi(input).or_else(|| normalize_url(input))
}

/// Classifies a single token by shape alone.
pub fn identifier_kind(input: &str) -> Option<IdentifierKind> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }
    if validate_doi(trimmed).is_some() {
        Some(IdentifierKind::Doi)
    } else if normalize_orcid(trimmed).is_some() {
        Some(IdentifierKind::Orcid)
    } else if normalize_url(trimmed).is_some() {
        Some(IdentifierKind::Url)
    } else {
        None
    }
}
