//! DataCite JSON reader and writer.
//!
//! Records are read through [`serde_json::Value`] rather than typed structs
//! so that loosely-formed documents (repeated keys, singular `creator`
//! lists, numeric years) still yield what they can.

use super::{
    KERNEL_MARKER, kernel_agent, name_type, periodical_from_issn, related_with_issn,
    resource_type_text, resource_types, schema_version,
};
use crate::crosswalk::Vocabulary;
use crate::error::{ParseError, WriteError};
use crate::identifier::{doi_from_url, normalize_doi, normalize_id, validate_doi};
use crate::json::{self, as_list, first_text, get_text, object, text, texts};
use crate::metadata::{
    Agent, AlternateIdentifier, Container, DateEntry, DateType, Description, FundingReference,
    GeoLocation, Metadata, RelatedIdentifier, Rights, Subject, Title,
};
use crate::{Format, MetadataFormat, Sniff};
use serde::Serialize;
use serde_json::{Map, Value};

/// DataCite JSON, `.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataciteJsonFormat;

impl MetadataFormat for DataciteJsonFormat {
    fn format(&self) -> Format {
        Format::DataciteJson
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.json().is_some_and(|map| {
            get_text(map, "schemaVersion").is_some_and(|v| v.contains(KERNEL_MARKER))
                || (object(map, "types").is_some_and(|t| t.contains_key("resourceTypeGeneral"))
                    && map.contains_key("titles"))
        })
    }

    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let map = json::parse_object(content, Format::DataciteJson)?;
        Ok(read_record(&map))
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        json::to_pretty(&DataciteRecord::from(metadata), Format::DataciteJson)
    }
}

fn read_record(map: &Map<String, Value>) -> Metadata {
    let mut metadata = Metadata::new();

    let doi = first_text(map, &["doi", "id"])
        .as_deref()
        .and_then(doi_from_url);
    metadata.identifier = doi
        .as_deref()
        .and_then(normalize_doi)
        .or_else(|| get_text(map, "id").as_deref().and_then(normalize_id));
    metadata.doi = doi;
    metadata.url = get_text(map, "url");

    let types = object(map, "types");
    metadata.types = resource_types(
        types.and_then(|t| get_text(t, "resourceTypeGeneral")).as_deref(),
        types.and_then(|t| get_text(t, "resourceType")),
        types.and_then(|t| get_text(t, "schemaOrg")).as_deref(),
    );

    metadata.creators = agents(map, &["creators", "creator"]);
    metadata.contributors = agents(map, &["contributors", "contributor"]);

    metadata.titles = as_list(map.get("titles"))
        .into_iter()
        .filter_map(|title| match title {
            Value::Object(t) => Some(Title {
                title: get_text(t, "title")?,
                title_type: get_text(t, "titleType"),
            }),
            other => text(other).map(Title::new),
        })
        .collect();
    metadata.descriptions = as_list(map.get("descriptions"))
        .into_iter()
        .filter_map(|description| match description {
            Value::Object(d) => Some(Description {
                description: texts(d.get("description")).join(" "),
                description_type: get_text(d, "descriptionType"),
            })
            .filter(|d| !d.description.is_empty()),
            other => text(other).map(Description::new),
        })
        .collect();
    metadata.subjects = as_list(map.get("subjects"))
        .into_iter()
        .filter_map(|subject| match subject {
            Value::Object(s) => Some(Subject {
                subject: get_text(s, "subject")?,
                subject_scheme: get_text(s, "subjectScheme"),
            }),
            other => text(other).map(Subject::new),
        })
        .collect();
    metadata.dates = as_list(map.get("dates"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|d| {
            Some(DateEntry {
                date: get_text(d, "date")?,
                date_type: DateType::parse(&get_text(d, "dateType").unwrap_or_default()),
            })
        })
        .collect();
    metadata.publication_year = get_text(map, "publicationYear");
    metadata.publisher = map.get("publisher").and_then(|publisher| match publisher {
        Value::Object(p) => get_text(p, "name"),
        other => text(other),
    });
    metadata.periodical = ["periodical", "container"]
        .iter()
        .find_map(|key| object(map, key))
        .and_then(|container| {
            let issn = get_text(container, "issn").or_else(|| {
                get_text(container, "identifier").filter(|_| {
                    get_text(container, "identifierType").as_deref() == Some("ISSN")
                })
            });
            Container {
                container_type: get_text(container, "type"),
                title: get_text(container, "title"),
                issn,
                url: get_text(container, "url"),
                volume: get_text(container, "volume"),
                issue: get_text(container, "issue"),
                first_page: get_text(container, "firstPage"),
                last_page: get_text(container, "lastPage"),
            }
            .non_empty()
        });

    metadata.related_identifiers = as_list(map.get("relatedIdentifiers"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|r| {
            let kind = get_text(r, "relatedIdentifierType").unwrap_or_else(|| "URL".to_string());
            let value = get_text(r, "relatedIdentifier")?;
            let value = match kind.as_str() {
                "DOI" => validate_doi(&value).unwrap_or(value),
                _ => value,
            };
            Some(RelatedIdentifier {
                related_identifier: value,
                related_identifier_type: kind,
                relation_type: get_text(r, "relationType")?,
                resource_type_general: get_text(r, "resourceTypeGeneral"),
            })
        })
        .collect();
    periodical_from_issn(&mut metadata);

    metadata.alternate_identifiers = as_list(map.get("alternateIdentifiers"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|a| {
            Some(AlternateIdentifier {
                alternate_identifier: get_text(a, "alternateIdentifier")?,
                alternate_identifier_type: get_text(a, "alternateIdentifierType")
                    .unwrap_or_else(|| "Other".to_string()),
            })
        })
        .collect();
    metadata.funding_references = decode_all(map.get("fundingReferences"));
    metadata.geo_locations = decode_all::<GeoLocation>(map.get("geoLocations"))
        .into_iter()
        .filter(|location| !matches!(location, GeoLocation::Other(o) if o.is_empty()))
        .collect();
    metadata.rights_list = as_list(map.get("rightsList"))
        .into_iter()
        .filter_map(Value::as_object)
        .map(|r| Rights {
            rights: get_text(r, "rights"),
            rights_uri: first_text(r, &["rightsUri", "rightsURI"]),
        })
        .filter(|r| r.rights.is_some() || r.rights_uri.is_some())
        .collect();

    metadata.sizes = texts(map.get("sizes"));
    metadata.formats = texts(map.get("formats"));
    metadata.version = get_text(map, "version");
    metadata.language = get_text(map, "language");
    metadata.content_url = texts(map.get("contentUrl"));
    metadata.schema_version = get_text(map, "schemaVersion");
    metadata.provider_id = get_text(map, "providerId");
    metadata.client_id = get_text(map, "clientId");
    metadata.source = get_text(map, "source");

    metadata
}

/// Items that deserialize cleanly; the rest are dropped.
fn decode_all<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    as_list(value)
        .into_iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

fn agents(map: &Map<String, Value>, keys: &[&str]) -> Vec<Agent> {
    let Some(value) = keys.iter().find_map(|key| map.get(*key)) else {
        return Vec::new();
    };
    as_list(Some(value))
        .into_iter()
        .filter_map(|agent| match agent {
            Value::Object(a) => {
                let identifier = get_text(a, "id").map(|id| (id, None)).or_else(|| {
                    as_list(a.get("nameIdentifiers"))
                        .into_iter()
                        .filter_map(Value::as_object)
                        .find_map(|n| {
                            Some((
                                get_text(n, "nameIdentifier")?,
                                get_text(n, "nameIdentifierScheme"),
                            ))
                        })
                });
                let kind = first_text(a, &["nameType", "type"]);
                let agent = kernel_agent(
                    get_text(a, "name"),
                    kind.as_deref(),
                    get_text(a, "givenName"),
                    get_text(a, "familyName"),
                    identifier,
                )?;
                Some(Agent {
                    contributor_type: get_text(a, "contributorType"),
                    ..agent
                })
            }
            other => text(other).and_then(|name| kernel_agent(Some(name), None, None, None, None)),
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataciteAgent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name_type: Option<&'static str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    given_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    family_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    name_identifiers: Vec<NameIdentifier<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contributor_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NameIdentifier<'a> {
    name_identifier: &'a str,
    name_identifier_scheme: &'static str,
}

impl<'a> From<&'a Agent> for DataciteAgent<'a> {
    fn from(agent: &'a Agent) -> Self {
        DataciteAgent {
            name_type: name_type(agent),
            name: &agent.name,
            given_name: agent.given_name.as_deref(),
            family_name: agent.family_name.as_deref(),
            name_identifiers: agent
                .identifier
                .as_deref()
                .map(|id| NameIdentifier {
                    name_identifier: id,
                    name_identifier_scheme: if id.contains("orcid.org") { "ORCID" } else { "URL" },
                })
                .into_iter()
                .collect(),
            contributor_type: agent.contributor_type.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataciteTypes<'a> {
    resource_type_general: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_type: Option<&'a str>,
    schema_org: &'static str,
    bibtex: &'static str,
    citeproc: &'static str,
    ris: &'static str,
}

/// A DataCite JSON record. Field order is output order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataciteRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(rename = "creator", skip_serializing_if = "Vec::is_empty")]
    creators: Vec<DataciteAgent<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    titles: &'a [Title],
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    periodical: Option<Container>,
    types: DataciteTypes<'a>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    subjects: &'a [Subject],
    #[serde(rename = "contributor", skip_serializing_if = "Vec::is_empty")]
    contributors: Vec<DataciteAgent<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    dates: &'a [DateEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    publication_year: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    alternate_identifiers: &'a [AlternateIdentifier],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related_identifiers: Vec<RelatedIdentifier>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    sizes: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    formats: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    rights_list: &'a [Rights],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    descriptions: &'a [Description],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    geo_locations: &'a [GeoLocation],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    funding_references: &'a [FundingReference],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    content_url: &'a [String],
    schema_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

impl<'a> From<&'a Metadata> for DataciteRecord<'a> {
    fn from(metadata: &'a Metadata) -> Self {
        // the ISSN travels as an IsPartOf relation
        let periodical = metadata.periodical.clone().and_then(|p| {
            Container {
                issn: None,
                ..p
            }
            .non_empty()
        });
        DataciteRecord {
            id: metadata.identifier.as_deref(),
            doi: metadata.doi.clone().or_else(|| metadata.doi_name()),
            url: metadata.url.as_deref(),
            creators: metadata.creators.iter().map(DataciteAgent::from).collect(),
            titles: &metadata.titles,
            publisher: metadata.publisher.as_deref(),
            periodical,
            types: DataciteTypes {
                resource_type_general: metadata.type_in(Vocabulary::ResourceTypeGeneral),
                resource_type: resource_type_text(metadata),
                schema_org: metadata.type_in(Vocabulary::LinkedData),
                bibtex: metadata.type_in(Vocabulary::Bibliography),
                citeproc: metadata.type_in(Vocabulary::CitationStyle),
                ris: metadata.type_in(Vocabulary::CitationTag),
            },
            subjects: &metadata.subjects,
            contributors: metadata.contributors.iter().map(DataciteAgent::from).collect(),
            dates: &metadata.dates,
            publication_year: metadata.year(),
            language: metadata.language.as_deref(),
            alternate_identifiers: &metadata.alternate_identifiers,
            related_identifiers: related_with_issn(metadata),
            sizes: &metadata.sizes,
            formats: &metadata.formats,
            version: metadata.version.as_deref(),
            rights_list: &metadata.rights_list,
            descriptions: &metadata.descriptions,
            geo_locations: &metadata.geo_locations,
            funding_references: &metadata.funding_references,
            content_url: &metadata.content_url,
            schema_version: schema_version(metadata),
            provider_id: metadata.provider_id.as_deref(),
            client_id: metadata.client_id.as_deref(),
            source: metadata.source.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::metadata::AgentKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_fixture() {
        let metadata = DataciteJsonFormat.parse(fixtures::DATACITE_JSON).unwrap();
        assert_eq!(
            metadata.identifier.as_deref(),
            Some("https://doi.org/10.5063/f1m61h5x")
        );
        assert_eq!(metadata.doi.as_deref(), Some("10.5063/F1M61H5X"));
        assert_eq!(metadata.url.as_deref(), Some("https://github.com/datacite/maremma"));
        assert_eq!(metadata.types.resource_type_general.as_deref(), Some("Software"));
        assert_eq!(metadata.types.resource_type.as_deref(), Some("Ruby gem"));
        assert_eq!(
            metadata.types.schema_org.as_deref(),
            Some("SoftwareSourceCode")
        );

        let creator = &metadata.creators[0];
        assert_eq!(creator.kind, Some(AgentKind::Person));
        assert_eq!(creator.name, "Matt Jones");
        assert_eq!(
            creator.identifier.as_deref(),
            Some("https://orcid.org/0000-0003-0077-4738")
        );

        assert_eq!(
            metadata.title(),
            Some("Maremma: a Ruby library for simplified network calls")
        );
        assert_eq!(metadata.publisher.as_deref(), Some("KNB Data Repository"));
        assert_eq!(metadata.subjects.len(), 2);
        assert_eq!(metadata.year(), Some("2017"));
        assert_eq!(metadata.related_identifiers[0].relation_type, "IsSupplementTo");
        assert_eq!(metadata.rights_list[0].rights.as_deref(), Some("MIT License"));
        assert_eq!(metadata.abstract_text(), Some("Ruby utility library for network requests."));
        assert_eq!(metadata.provider_id.as_deref(), Some("DATACITE"));
        assert_eq!(metadata.client_id.as_deref(), Some("DATACITE.DATACITE"));
    }

    #[test]
    fn test_repeated_keys_still_read() {
        let metadata = DataciteJsonFormat
            .parse(fixtures::DATACITE_JSON_OVERLAPPING_KEYS)
            .unwrap();
        assert_eq!(
            metadata.identifier.as_deref(),
            Some("https://doi.org/10.5063/f1m61h5x")
        );
        assert_eq!(metadata.types.resource_type_general.as_deref(), Some("Software"));
    }

    #[test]
    fn test_malformed_json_has_position() {
        let error = DataciteJsonFormat
            .parse(fixtures::DATACITE_JSON_MISSING_COMMA)
            .unwrap_err();
        assert_eq!(error.format, Format::DataciteJson);
        assert_eq!(error.line, Some(4));
    }

    #[test]
    fn test_loose_shapes() {
        let input = r#"{
  "doi": "10.5438/4K3M-NYVG",
  "creator": "DataCite Support",
  "titles": "Eating your own Dog Food",
  "publicationYear": 2016,
  "publisher": {"name": "DataCite"},
  "geoLocations": [{"geoLocationPlace": "Berlin"}, {}],
  "types": {"resourceTypeGeneral": "Text", "schemaOrg": "BlogPosting"}
}"#;
        let metadata = DataciteJsonFormat.parse(input).unwrap();
        assert_eq!(metadata.creators[0].name, "DataCite Support");
        assert_eq!(metadata.title(), Some("Eating your own Dog Food"));
        assert_eq!(metadata.year(), Some("2016"));
        assert_eq!(metadata.publisher.as_deref(), Some("DataCite"));
        assert_eq!(metadata.geo_locations, vec![GeoLocation::Place("Berlin".to_string())]);
        assert_eq!(metadata.types.schema_org.as_deref(), Some("BlogPosting"));
        assert_eq!(metadata.types.resource_type, None);
    }

    #[test]
    fn test_round_trip() {
        let metadata = DataciteJsonFormat.parse(fixtures::DATACITE_JSON).unwrap();
        let output = DataciteJsonFormat.serialize(&metadata).unwrap();
        assert!(output.starts_with("{\n  \"id\": \"https://doi.org/10.5063/f1m61h5x\""));
        assert!(DataciteJsonFormat.recognizes(&Sniff::new(&output)));

        let reread = DataciteJsonFormat.parse(&output).unwrap();
        assert_eq!(reread.identifier, metadata.identifier);
        assert_eq!(reread.types, metadata.types);
        assert_eq!(reread.creators, metadata.creators);
        assert_eq!(reread.titles, metadata.titles);
        assert_eq!(reread.dates, metadata.dates);
        assert_eq!(reread.related_identifiers, metadata.related_identifiers);
        assert_eq!(reread.rights_list, metadata.rights_list);
        assert_eq!(reread.schema_version, metadata.schema_version);
    }

    #[test]
    fn test_write_uses_singular_agent_keys() {
        let mut metadata = DataciteJsonFormat.parse(fixtures::DATACITE_JSON).unwrap();
        assert!(!metadata.creators.is_empty());
        metadata.contributors = vec![Agent::organization("DataCite")];

        let output = DataciteJsonFormat.serialize(&metadata).unwrap();
        assert!(output.contains("\"creator\": ["));
        assert!(output.contains("\"contributor\": ["));
        assert!(!output.contains("\"creators\""));
        assert!(!output.contains("\"contributors\""));

        let reread = DataciteJsonFormat.parse(&output).unwrap();
        assert_eq!(reread.creators, metadata.creators);
        assert_eq!(reread.contributors[0].name, "DataCite");
    }

    #[test]
    fn test_write_carries_issn_as_relation() {
        let mut metadata = Metadata::new();
        metadata.identifier = Some("https://doi.org/10.7554/elife.01567".to_string());
        metadata.periodical = Some(Container {
            container_type: Some("Journal".to_string()),
            title: Some("eLife".to_string()),
            issn: Some("2050-084X".to_string()),
            ..Container::default()
        });
        let output = DataciteJsonFormat.serialize(&metadata).unwrap();
        let reread = DataciteJsonFormat.parse(&output).unwrap();
        assert_eq!(reread.periodical, metadata.periodical);
        assert!(reread.related_identifiers.is_empty());
        assert_eq!(
            reread.schema_version.as_deref(),
            Some("http://datacite.org/schema/kernel-4")
        );
    }

    #[test]
    fn test_recognizes() {
        assert!(DataciteJsonFormat.recognizes(&Sniff::new(fixtures::DATACITE_JSON)));
        assert!(DataciteJsonFormat.recognizes(&Sniff::new(
            r#"{"types": {"resourceTypeGeneral": "Text"}, "titles": []}"#
        )));
        assert!(!DataciteJsonFormat.recognizes(&Sniff::new(fixtures::CROSSREF_JSON)));
    }
}
