//! Linked-data reading shared by schema.org and CodeMeta.
//!
//! CodeMeta is schema.org with a few renamed keys (`agents`, `title`, `tags`,
//! `codeRepository`, `licenseId`), so one reader accepts both spellings.

use crate::crosswalk::Vocabulary;
use crate::identifier::{doi_from_url, normalize_doi, normalize_id, normalize_orcid, normalize_url};
use crate::json::{as_list, first_text, get_text, object, text, texts};
use crate::metadata::{
    Agent, AgentKind, AlternateIdentifier, Container, DateType, Description, FundingReference,
    GeoBox, GeoLocation, GeoPoint, Metadata, RelatedIdentifier, Rights, Subject, Title, Types,
};
use crate::utils::{agent_from_name, split_keywords};
use serde_json::{Map, Value};

/// Relations in the order they are collected.
const RELATIONS: [(&str, &str); 5] = [
    ("hasPart", "HasPart"),
    ("predecessor_of", "IsPreviousVersionOf"),
    ("successor_of", "IsNewVersionOf"),
    ("isBasedOn", "IsSupplementTo"),
    ("citation", "References"),
];

const FUNDER_ID_PREFIX: &str = "https://doi.org/10.13039/";

/// Reads a JSON-LD object describing one creative work.
pub(crate) fn read_linked_data(map: &Map<String, Value>) -> Metadata {
    let mut metadata = Metadata::new();

    let schema_type = get_text(map, "@type").unwrap_or_default();
    metadata.types = Types::from_source(Vocabulary::LinkedData, &schema_type)
        .with_resource_type(get_text(map, "additionalType"));

    let (identifier, doi) = identifier(map);
    metadata.identifier = identifier;
    metadata.doi = doi;
    metadata.url = first_text(map, &["url", "codeRepository"]);
    metadata.alternate_identifiers = alternate_identifiers(map);

    let authors = ["author", "agents", "creator"]
        .iter()
        .find(|key| map.contains_key(**key))
        .map(|key| agents(map.get(*key)))
        .unwrap_or_default();
    metadata.creators = authors;
    metadata.contributors = with_role(agents(map.get("editor")), "Editor")
        .chain(with_role(agents(map.get("contributor")), "Other"))
        .collect();

    if let Some(title) = first_text(map, &["name", "title", "headline"]) {
        metadata.titles.push(Title::new(title));
    }
    for alternate in texts(map.get("alternateName")) {
        metadata.titles.push(Title {
            title: alternate,
            title_type: Some("AlternativeTitle".to_string()),
        });
    }
    if let Some(description) = get_text(map, "description") {
        metadata.descriptions.push(Description {
            description,
            description_type: Some("Abstract".to_string()),
        });
    }
    metadata.subjects = keywords(map)
        .into_iter()
        .map(Subject::new)
        .collect();

    metadata.push_date(get_text(map, "datePublished"), DateType::Issued);
    metadata.push_date(get_text(map, "dateCreated"), DateType::Created);
    metadata.push_date(get_text(map, "dateModified"), DateType::Updated);

    metadata.publisher = map.get("publisher").and_then(name_of);
    metadata.periodical = periodical(map);

    metadata.related_identifiers = related_identifiers(map);
    metadata.funding_references = as_list(map.get("funder"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(funding_reference)
        .collect();
    metadata.geo_locations = as_list(map.get("spatialCoverage"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(geo_location)
        .collect();

    metadata.rights_list = as_list(map.get("license"))
        .into_iter()
        .chain(as_list(map.get("licenseId")))
        .filter_map(|license| {
            let license = match license {
                Value::Object(o) => first_text(o, &["@id", "url", "name"])?,
                other => text(other)?,
            };
            Some(match normalize_url(&license) {
                Some(_) => Rights {
                    rights: None,
                    rights_uri: Some(license),
                },
                None => Rights {
                    rights: Some(license),
                    rights_uri: None,
                },
            })
        })
        .collect();

    metadata.version = get_text(map, "version");
    metadata.language = map.get("inLanguage").and_then(|lang| match lang {
        Value::Object(o) => first_text(o, &["alternateName", "name"]),
        other => text(other),
    });
    metadata.sizes = texts(map.get("contentSize"));
    metadata.formats = texts(map.get("encodingFormat"))
        .into_iter()
        .chain(texts(map.get("fileFormat")))
        .collect();
    metadata.content_url = texts(map.get("contentUrl"))
        .into_iter()
        .chain(
            as_list(map.get("distribution"))
                .into_iter()
                .filter_map(Value::as_object)
                .filter_map(|d| get_text(d, "contentUrl")),
        )
        .collect();
    metadata.schema_version = get_text(map, "schemaVersion").or_else(|| get_text(map, "@context"));

    metadata
}

/// Resolver identifier and literal DOI from `@id`, `identifier` or `url`.
fn identifier(map: &Map<String, Value>) -> (Option<String>, Option<String>) {
    let property_doi = as_list(map.get("identifier"))
        .into_iter()
        .filter_map(Value::as_object)
        .find(|pv| get_text(pv, "propertyID").is_some_and(|id| id.eq_ignore_ascii_case("doi")))
        .and_then(|pv| get_text(pv, "value"));

    let candidates = [
        get_text(map, "@id"),
        property_doi,
        get_text(map, "identifier"),
        get_text(map, "url"),
    ];
    let doi = candidates
        .iter()
        .flatten()
        .find_map(|candidate| doi_from_url(candidate));
    let identifier = match &doi {
        Some(doi) => normalize_doi(doi),
        None => candidates
            .iter()
            .flatten()
            .find_map(|candidate| normalize_id(candidate)),
    };
    (identifier, doi)
}

fn alternate_identifiers(map: &Map<String, Value>) -> Vec<AlternateIdentifier> {
    as_list(map.get("identifier"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|pv| {
            let property_id = get_text(pv, "propertyID")?;
            if property_id.eq_ignore_ascii_case("doi") {
                return None;
            }
            Some(AlternateIdentifier {
                alternate_identifier: get_text(pv, "value")?,
                alternate_identifier_type: property_id,
            })
        })
        .collect()
}

fn with_role(agents: Vec<Agent>, role: &'static str) -> impl Iterator<Item = Agent> {
    agents.into_iter().map(move |agent| Agent {
        contributor_type: Some(role.to_string()),
        ..agent
    })
}

pub(crate) fn agents(value: Option<&Value>) -> Vec<Agent> {
    as_list(value).into_iter().filter_map(agent).collect()
}

/// A person or organization object, or a bare name.
fn agent(value: &Value) -> Option<Agent> {
    let map = match value {
        Value::Object(map) => map,
        other => return text(other).map(|name| agent_from_name(&name)),
    };
    let kind = get_text(map, "@type").and_then(|t| match t.to_ascii_lowercase().as_str() {
        "person" => Some(AgentKind::Person),
        "organization" => Some(AgentKind::Organization),
        _ => None,
    });
    let given_name = get_text(map, "givenName");
    let family_name = get_text(map, "familyName");
    let name = get_text(map, "name");

    let mut agent = match kind {
        Some(AgentKind::Organization) => Agent::organization(name?),
        _ if given_name.is_some() || family_name.is_some() => {
            let mut person = Agent::person(given_name, family_name);
            if let Some(name) = name {
                person.name = name;
            }
            person
        }
        Some(AgentKind::Person) => {
            let name = name?;
            match agent_from_name(&name) {
                split if split.family_name.is_some() => split,
                _ => Agent {
                    kind: Some(AgentKind::Person),
                    name,
                    ..Agent::default()
                },
            }
        }
        None => agent_from_name(&name?),
    };
    agent.identifier = get_text(map, "@id")
        .as_deref()
        .and_then(|id| normalize_orcid(id).or_else(|| normalize_url(id)));
    Some(agent)
}

/// `name` of an object, or the value itself when it is a string.
fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => get_text(map, "name"),
        other => text(other),
    }
}

fn keywords(map: &Map<String, Value>) -> Vec<String> {
    let value = map.get("keywords").or_else(|| map.get("tags"));
    match value {
        Some(Value::String(keywords)) => split_keywords(keywords),
        other => texts(other),
    }
}

/// The containing periodical or catalog.
fn periodical(map: &Map<String, Value>) -> Option<Container> {
    let part_of = object(map, "isPartOf")
        .filter(|o| get_text(o, "@type").as_deref() != Some("CreativeWork"));
    let container = object(map, "periodical")
        .or_else(|| object(map, "includedInDataCatalog"))
        .or(part_of)?;
    Container {
        container_type: get_text(container, "@type"),
        title: get_text(container, "name"),
        issn: get_text(container, "issn"),
        url: get_text(container, "url"),
        volume: get_text(map, "volumeNumber").or_else(|| get_text(container, "volumeNumber")),
        issue: get_text(map, "issueNumber").or_else(|| get_text(container, "issueNumber")),
        first_page: get_text(map, "pageStart"),
        last_page: get_text(map, "pageEnd"),
    }
    .non_empty()
}

fn related_identifiers(map: &Map<String, Value>) -> Vec<RelatedIdentifier> {
    let is_part_of = object(map, "isPartOf")
        .filter(|o| get_text(o, "@type").as_deref() == Some("CreativeWork"))
        .and_then(|o| get_text(o, "@id"))
        .and_then(|id| RelatedIdentifier::from_id(&id, "IsPartOf"));

    let others = RELATIONS.iter().flat_map(|(key, relation)| {
        as_list(map.get(*key))
            .into_iter()
            .filter_map(move |value| {
                let id = match value {
                    Value::Object(o) => get_text(o, "@id")?,
                    other => text(other)?,
                };
                RelatedIdentifier::from_id(&id, relation)
            })
    });

    is_part_of.into_iter().chain(others).collect()
}

fn funding_reference(funder: &Map<String, Value>) -> Option<FundingReference> {
    let funder_name = get_text(funder, "name")?;
    let id = get_text(funder, "@id");
    let (funder_identifier, funder_identifier_type) = match id.as_deref() {
        Some(id) => match normalize_doi(id) {
            Some(doi) if doi.starts_with(FUNDER_ID_PREFIX) => {
                (Some(doi), Some("Crossref Funder ID".to_string()))
            }
            Some(doi) => (Some(doi), Some("Other".to_string())),
            None => (normalize_url(id), Some("Other".to_string())),
        },
        None => (None, None),
    };
    Some(FundingReference {
        funder_name,
        funder_identifier_type: funder_identifier_type.filter(|_| funder_identifier.is_some()),
        funder_identifier,
        ..FundingReference::default()
    })
}

/// A `Place` with coordinates, a box, or just a name.
fn geo_location(place: &Map<String, Value>) -> Option<GeoLocation> {
    let name = get_text(place, "name");
    let Some(geo) = object(place, "geo") else {
        return name.map(GeoLocation::Place);
    };
    match get_text(geo, "@type").as_deref() {
        Some("GeoShape") => {
            let corners: Vec<String> = get_text(geo, "box")?
                .split_whitespace()
                .map(String::from)
                .collect();
            let [south, west, north, east] = <[String; 4]>::try_from(corners).ok()?;
            Some(GeoLocation::Box {
                bbox: GeoBox {
                    west_bound_longitude: west,
                    east_bound_longitude: east,
                    south_bound_latitude: south,
                    north_bound_latitude: north,
                },
                place: name,
            })
        }
        _ => Some(GeoLocation::Point {
            point: GeoPoint {
                point_latitude: get_text(geo, "latitude")?,
                point_longitude: get_text(geo, "longitude")?,
            },
            place: get_text(geo, "address").or(name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn read(value: Value) -> Metadata {
        read_linked_data(value.as_object().unwrap())
    }

    #[rstest]
    #[case(json!({"@type": "Person", "givenName": "Martin", "familyName": "Fenner", "name": "Martin Fenner"}), Some(AgentKind::Person), "Martin Fenner", Some("Fenner"))]
    #[case(json!({"@type": "Person", "name": "Fenner, Martin"}), Some(AgentKind::Person), "Fenner, Martin", Some("Fenner"))]
    #[case(json!({"@type": "person", "name": "Martin Fenner"}), Some(AgentKind::Person), "Martin Fenner", None)]
    #[case(json!({"@type": "Organization", "name": "Tara Oceans Consortium, Coordinators"}), Some(AgentKind::Organization), "Tara Oceans Consortium, Coordinators", None)]
    #[case(json!({"name": "Johansson, Emma"}), Some(AgentKind::Person), "Johansson, Emma", Some("Johansson"))]
    #[case(json!({"name": "The GTEx Consortium"}), None, "The GTEx Consortium", None)]
    #[case(json!("Smith, John"), Some(AgentKind::Person), "Smith, John", Some("Smith"))]
    fn test_agent_shapes(
        #[case] value: Value,
        #[case] kind: Option<AgentKind>,
        #[case] name: &str,
        #[case] family: Option<&str>,
    ) {
        let agent = agent(&value).unwrap();
        assert_eq!(agent.kind, kind);
        assert_eq!(agent.name, name);
        assert_eq!(agent.family_name.as_deref(), family);
    }

    #[test]
    fn test_identifier_sources() {
        let metadata = read(json!({"@id": "https://doi.org/10.5438/4K3M-NYVG"}));
        assert_eq!(
            metadata.identifier.as_deref(),
            Some("https://doi.org/10.5438/4k3m-nyvg")
        );
        assert_eq!(metadata.doi.as_deref(), Some("10.5438/4K3M-NYVG"));

        let metadata = read(json!({
            "identifier": {"@type": "PropertyValue", "propertyID": "doi", "value": "10.23725/7JG3"},
            "url": "https://example.org/x"
        }));
        assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.23725/7jg3"));

        let metadata = read(json!({"url": "https://github.com/datacite/maremma"}));
        assert_eq!(
            metadata.identifier.as_deref(),
            Some("https://github.com/datacite/maremma")
        );
        assert_eq!(metadata.doi, None);
    }

    #[test]
    fn test_keywords_string_or_list() {
        let metadata = read(json!({"keywords": "a, b"}));
        assert_eq!(metadata.subjects.len(), 2);
        let metadata = read(json!({"tags": ["faraday", "excon"]}));
        assert_eq!(metadata.subjects[1].subject, "excon");
    }

    #[test]
    fn test_relations_in_order() {
        let metadata = read(json!({
            "citation": [{"@id": "https://doi.org/10.5438/0012"}],
            "isPartOf": {"@type": "CreativeWork", "@id": "https://doi.org/10.5438/0000-00SS"},
            "isBasedOn": "https://example.org/source",
            "hasPart": {"@id": "https://doi.org/10.5438/PART"}
        }));
        let relations: Vec<&str> = metadata
            .related_identifiers
            .iter()
            .map(|r| r.relation_type.as_str())
            .collect();
        assert_eq!(
            relations,
            vec!["IsPartOf", "HasPart", "IsSupplementTo", "References"]
        );
        assert_eq!(metadata.related_identifiers[2].related_identifier_type, "URL");
        assert_eq!(metadata.periodical, None);
    }

    #[test]
    fn test_part_of_periodical() {
        let metadata = read(json!({
            "isPartOf": {"@type": "Periodical", "name": "eLife", "issn": "2050-084X"},
            "pageStart": "e01567"
        }));
        let periodical = metadata.periodical.unwrap();
        assert_eq!(periodical.container_type.as_deref(), Some("Periodical"));
        assert_eq!(periodical.issn.as_deref(), Some("2050-084X"));
        assert_eq!(periodical.first_page.as_deref(), Some("e01567"));
        assert!(metadata.related_identifiers.is_empty());
    }

    #[test]
    fn test_funders() {
        let metadata = read(json!({"funder": [
            {"@type": "Organization", "@id": "https://doi.org/10.13039/100000050", "name": "NHLBI"},
            {"@type": "Organization", "name": "NSF"}
        ]}));
        assert_eq!(
            metadata.funding_references[0],
            FundingReference {
                funder_name: "NHLBI".to_string(),
                funder_identifier: Some("https://doi.org/10.13039/100000050".to_string()),
                funder_identifier_type: Some("Crossref Funder ID".to_string()),
                ..FundingReference::default()
            }
        );
        assert_eq!(metadata.funding_references[1].funder_identifier, None);
        assert_eq!(metadata.funding_references[1].funder_identifier_type, None);
    }

    #[test]
    fn test_rights_sources() {
        let metadata = read(json!({"licenseId": "MIT"}));
        assert_eq!(metadata.rights_list[0].rights.as_deref(), Some("MIT"));
        let metadata = read(json!({"license": {"@id": "https://opensource.org/licenses/MIT"}}));
        assert_eq!(
            metadata.rights_list[0].rights_uri.as_deref(),
            Some("https://opensource.org/licenses/MIT")
        );
    }
}
