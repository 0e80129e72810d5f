//! Crossref metadata: deposit and query XML, and REST API work messages.
//!
//! # Example
//!
//! ```
//! use bibmeta::{CrossrefJsonFormat, MetadataFormat};
//!
//! let input = r#"{
//!   "status": "ok",
//!   "message-type": "work",
//!   "message": {
//!     "DOI": "10.1371/journal.pone.0000030",
//!     "type": "journal-article",
//!     "title": ["Triose Phosphate Isomerase Deficiency"],
//!     "container-title": ["PLoS ONE"]
//!   }
//! }"#;
//!
//! let metadata = CrossrefJsonFormat.parse(input).unwrap();
//! assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.1371/journal.pone.0000030"));
//! assert_eq!(metadata.types.ris.as_deref(), Some("JOUR"));
//! ```

mod json;
mod xml;

pub use json::CrossrefJsonFormat;
pub use xml::CrossrefXmlFormat;

use crate::crosswalk::Vocabulary;
use crate::identifier::normalize_doi;
use crate::metadata::{FundingReference, Metadata, Types};
use crate::regex::Regex;
use once_cell::sync::Lazy;

static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Types of a work from its Crossref type, which is kept as `resource_type`.
pub(crate) fn work_types(crossref_type: &str) -> Types {
    Types::from_source(Vocabulary::RegistryWorkType, crossref_type)
        .with_resource_type(Some(crossref_type.to_string()))
}

/// Crossref type to write: the recorded one when it is a Crossref term,
/// the crosswalk's otherwise.
pub(crate) fn work_type(metadata: &Metadata) -> &str {
    match metadata.types.resource_type.as_deref() {
        Some(term) if Vocabulary::RegistryWorkType.contains(term) => term,
        _ => metadata.type_in(Vocabulary::RegistryWorkType),
    }
}

/// Container type implied by a Crossref work type.
pub(crate) fn container_type(crossref_type: &str) -> &'static str {
    match crossref_type {
        "journal-article" => "Journal",
        "book-chapter" => "Book",
        "proceedings-article" => "Proceedings",
        _ => "Periodical",
    }
}

/// Text of a JATS fragment with the tags removed and whitespace collapsed.
pub(crate) fn strip_markup(text: &str) -> Option<String> {
    let plain = MARKUP_REGEX.replace_all(text, " ");
    crate::utils::non_blank(&plain.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// A funder, identified by its Funder Registry DOI when it has one.
pub(crate) fn funder(
    funder_name: String,
    funder_doi: Option<&str>,
    award_number: Option<String>,
) -> FundingReference {
    let funder_identifier = funder_doi.and_then(normalize_doi);
    FundingReference {
        funder_name,
        funder_identifier_type: funder_identifier
            .as_ref()
            .map(|_| "Crossref Funder ID".to_string()),
        funder_identifier,
        award_number,
        award_title: None,
    }
}
