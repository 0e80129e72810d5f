//! DataCite kernel-4 metadata, as XML and as JSON.
//!
//! Both serializations share the kernel's vocabulary: creators with name
//! identifiers, typed titles, dates and descriptions, related identifiers,
//! geo locations and funding references.
//!
//! # Example
//!
//! ```
//! use bibmeta::{DataciteXmlFormat, MetadataFormat};
//!
//! let input = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <resource xmlns="http://datacite.org/schema/kernel-4">
//!   <identifier identifierType="DOI">10.5438/4K3M-NYVG</identifier>
//!   <titles><title>Eating your own Dog Food</title></titles>
//!   <publisher>DataCite</publisher>
//!   <publicationYear>2016</publicationYear>
//!   <resourceType resourceTypeGeneral="Text">BlogPosting</resourceType>
//! </resource>"#;
//!
//! let metadata = DataciteXmlFormat.parse(input).unwrap();
//! assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.5438/4k3m-nyvg"));
//! assert_eq!(metadata.types.schema_org.as_deref(), Some("BlogPosting"));
//! assert_eq!(metadata.year(), Some("2016"));
//! ```

mod json;
mod xml;

pub use json::DataciteJsonFormat;
pub use xml::DataciteXmlFormat;

use crate::crosswalk::{Vocabulary, translate};
use crate::identifier::{normalize_orcid, normalize_url};
use crate::metadata::{Agent, AgentKind, Container, Metadata, RelatedIdentifier, Types};
use crate::utils::agent_from_name;

/// Namespace written by both serializations.
pub(crate) const KERNEL_NAMESPACE: &str = "http://datacite.org/schema/kernel-4";

/// Substring shared by every kernel version's namespace.
pub(crate) const KERNEL_MARKER: &str = "datacite.org/schema/kernel";

/// The record's schema version when it names a kernel, kernel-4 otherwise.
pub(crate) fn schema_version(metadata: &Metadata) -> &str {
    metadata
        .schema_version
        .as_deref()
        .filter(|version| version.contains(KERNEL_MARKER))
        .unwrap_or(KERNEL_NAMESPACE)
}

/// Types of a DataCite record.
///
/// A free-text `resourceType` (or an explicit `schemaOrg` entry) that is a
/// schema.org term consistent with `resourceTypeGeneral` becomes the source
/// term; otherwise `resourceTypeGeneral` is.
pub(crate) fn resource_types(
    resource_type_general: Option<&str>,
    resource_type: Option<String>,
    schema_org: Option<&str>,
) -> Types {
    let general = resource_type_general.unwrap_or_default();
    let expected = translate(
        Vocabulary::ResourceTypeGeneral,
        Vocabulary::ResourceTypeGeneral,
        general,
    );
    let linked = [resource_type.as_deref(), schema_org]
        .into_iter()
        .flatten()
        .find(|term| {
            Vocabulary::LinkedData.contains(term)
                && translate(Vocabulary::LinkedData, Vocabulary::ResourceTypeGeneral, term)
                    == expected
        });
    let types = match linked {
        Some(term) => Types::from_source(Vocabulary::LinkedData, term),
        None => Types::from_source(Vocabulary::ResourceTypeGeneral, general),
    };
    types.with_resource_type(resource_type)
}

/// Free-text `resourceType` written next to `resourceTypeGeneral`.
pub(crate) fn resource_type_text(metadata: &Metadata) -> Option<&str> {
    metadata
        .types
        .resource_type
        .as_deref()
        .or(metadata.types.schema_org.as_deref())
}

/// Kernel `nameType` of an agent.
pub(crate) fn name_type(agent: &Agent) -> Option<&'static str> {
    match agent.kind? {
        AgentKind::Person => Some("Personal"),
        AgentKind::Organization => Some("Organizational"),
    }
}

/// Creator or contributor from its kernel parts.
pub(crate) fn kernel_agent(
    name: Option<String>,
    name_type: Option<&str>,
    given_name: Option<String>,
    family_name: Option<String>,
    identifier: Option<(String, Option<String>)>,
) -> Option<Agent> {
    let mut agent = match name_type {
        Some("Organizational" | "Organization") => Agent::organization(name?),
        _ if given_name.is_some() || family_name.is_some() => {
            let mut person = Agent::person(given_name, family_name);
            if let Some(name) = name {
                person.name = name;
            }
            person
        }
        Some("Personal" | "Person") => Agent {
            kind: Some(AgentKind::Person),
            ..agent_from_name(&name?)
        },
        _ => agent_from_name(&name?),
    };
    agent.identifier = identifier.and_then(|(value, scheme)| {
        match scheme.as_deref().map(str::to_ascii_uppercase).as_deref() {
            Some("ORCID") => normalize_orcid(&value),
            _ => normalize_orcid(&value).or_else(|| normalize_url(&value)),
        }
    });
    Some(agent)
}

/// Moves an `IsPartOf` ISSN out of the related identifiers into the periodical.
pub(crate) fn periodical_from_issn(metadata: &mut Metadata) {
    let Some(position) = metadata.related_identifiers.iter().position(|r| {
        r.relation_type == "IsPartOf" && r.related_identifier_type == "ISSN"
    }) else {
        return;
    };
    let related = metadata.related_identifiers.remove(position);
    let periodical = metadata.periodical.get_or_insert_with(Container::default);
    periodical.issn = Some(related.related_identifier);
}

/// Related identifiers to write, with the periodical's ISSN as `IsPartOf`.
pub(crate) fn related_with_issn(metadata: &Metadata) -> Vec<RelatedIdentifier> {
    let issn = metadata
        .periodical
        .as_ref()
        .and_then(|p| p.issn.clone())
        .map(|issn| RelatedIdentifier {
            related_identifier: issn,
            related_identifier_type: "ISSN".to_string(),
            relation_type: "IsPartOf".to_string(),
            resource_type_general: None,
        });
    metadata
        .related_identifiers
        .iter()
        .cloned()
        .chain(issn)
        .collect()
}
