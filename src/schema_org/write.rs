//! JSON-LD rendering shared by schema.org and CodeMeta.

use crate::crosswalk::Vocabulary;
use crate::identifier::{DOI_RESOLVER, validate_doi};
use crate::metadata::{Agent, AgentKind, DateType, GeoLocation, Metadata, RelatedIdentifier};
use serde::Serialize;
use serde_json::{Map, Value, json};

pub(crate) const SCHEMA_ORG_CONTEXT: &str = "http://schema.org";

/// A schema.org creative work. Field order is output order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreativeWork {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    identifier: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternate_name: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    author: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    editor: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    contributor: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_end: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    spatial_coverage: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_part_of: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    has_part: Vec<Value>,
    #[serde(rename = "predecessor_of", skip_serializing_if = "Vec::is_empty")]
    predecessor_of: Vec<Value>,
    #[serde(rename = "successor_of", skip_serializing_if = "Vec::is_empty")]
    successor_of: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    is_based_on: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    citation: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    periodical: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    funder: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    distribution: Vec<Value>,
}

impl From<&Metadata> for CreativeWork {
    fn from(metadata: &Metadata) -> Self {
        let periodical = metadata.periodical.as_ref();
        let related = |relation: &str| -> Vec<Value> {
            metadata
                .related_identifiers
                .iter()
                .filter(|r| r.relation_type == relation)
                .map(creative_work_ref)
                .collect()
        };

        let mut identifier: Vec<Value> = Vec::new();
        if let Some(doi) = metadata.doi_name() {
            identifier.push(property_value("doi", &format!("{DOI_RESOLVER}{doi}")));
        }
        identifier.extend(metadata.alternate_identifiers.iter().map(|alt| {
            property_value(&alt.alternate_identifier_type, &alt.alternate_identifier)
        }));

        CreativeWork {
            context: SCHEMA_ORG_CONTEXT,
            schema_type: metadata.type_in(Vocabulary::LinkedData),
            id: metadata.identifier.clone(),
            identifier,
            url: metadata.url.clone(),
            additional_type: metadata.types.resource_type.clone(),
            name: metadata.title().map(String::from),
            alternate_name: metadata
                .titles
                .iter()
                .skip(1)
                .filter(|t| t.title_type.as_deref() == Some("AlternativeTitle"))
                .map(|t| t.title.clone())
                .collect(),
            author: metadata.creators.iter().map(person_or_organization).collect(),
            editor: contributors_with(metadata, |role| role == "Editor"),
            contributor: contributors_with(metadata, |role| role != "Editor"),
            description: metadata.abstract_text().map(String::from),
            license: license(metadata),
            version: metadata.version.clone(),
            keywords: (!metadata.subjects.is_empty()).then(|| {
                metadata
                    .subjects
                    .iter()
                    .map(|s| s.subject.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
            in_language: metadata.language.clone(),
            content_size: metadata.sizes.first().cloned(),
            encoding_format: metadata.formats.first().cloned(),
            date_created: metadata.date_of(DateType::Created).map(String::from),
            date_published: metadata
                .date_of(DateType::Issued)
                .or_else(|| metadata.year())
                .map(String::from),
            date_modified: metadata.date_of(DateType::Updated).map(String::from),
            page_start: periodical.and_then(|p| p.first_page.clone()),
            page_end: periodical.and_then(|p| p.last_page.clone()),
            spatial_coverage: metadata.geo_locations.iter().filter_map(place).collect(),
            is_part_of: related("IsPartOf").into_iter().next(),
            has_part: related("HasPart"),
            predecessor_of: related("IsPreviousVersionOf"),
            successor_of: related("IsNewVersionOf"),
            is_based_on: related("IsSupplementTo"),
            citation: related("References"),
            periodical: periodical
                .filter(|p| p.title.is_some() || p.issn.is_some())
                .map(|p| {
                    let mut container = Map::new();
                    container.insert(
                        "@type".to_string(),
                        json!(p.container_type.as_deref().unwrap_or("Periodical")),
                    );
                    insert_some(&mut container, "name", p.title.as_deref());
                    insert_some(&mut container, "issn", p.issn.as_deref());
                    insert_some(&mut container, "url", p.url.as_deref());
                    insert_some(&mut container, "volumeNumber", p.volume.as_deref());
                    insert_some(&mut container, "issueNumber", p.issue.as_deref());
                    Value::Object(container)
                }),
            publisher: metadata
                .publisher
                .as_deref()
                .map(|name| json!({"@type": "Organization", "name": name})),
            funder: metadata
                .funding_references
                .iter()
                .map(|funder| {
                    let mut org = Map::new();
                    org.insert("@type".to_string(), json!("Organization"));
                    insert_some(&mut org, "@id", funder.funder_identifier.as_deref());
                    org.insert("name".to_string(), json!(funder.funder_name));
                    Value::Object(org)
                })
                .collect(),
            distribution: metadata
                .content_url
                .iter()
                .map(|url| json!({"@type": "DataDownload", "contentUrl": url}))
                .collect(),
        }
    }
}

fn property_value(property_id: &str, value: &str) -> Value {
    json!({"@type": "PropertyValue", "propertyID": property_id, "value": value})
}

fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_string(), json!(value));
    }
}

fn contributors_with(metadata: &Metadata, role: impl Fn(&str) -> bool) -> Vec<Value> {
    metadata
        .contributors
        .iter()
        .filter(|c| role(c.contributor_type.as_deref().unwrap_or("Other")))
        .map(person_or_organization)
        .collect()
}

/// `Person` or `Organization` node; an agent of unknown kind carries only its name.
pub(crate) fn person_or_organization(agent: &Agent) -> Value {
    let mut node = Map::new();
    match agent.kind {
        Some(AgentKind::Person) => {
            node.insert("@type".to_string(), json!("Person"));
        }
        Some(AgentKind::Organization) => {
            node.insert("@type".to_string(), json!("Organization"));
        }
        None => {}
    }
    insert_some(&mut node, "@id", agent.identifier.as_deref());
    insert_some(&mut node, "givenName", agent.given_name.as_deref());
    insert_some(&mut node, "familyName", agent.family_name.as_deref());
    node.insert("name".to_string(), json!(agent.name));
    Value::Object(node)
}

fn creative_work_ref(related: &RelatedIdentifier) -> Value {
    let id = match validate_doi(&related.related_identifier) {
        Some(doi) if related.related_identifier_type == "DOI" => format!("{DOI_RESOLVER}{doi}"),
        _ => related.related_identifier.clone(),
    };
    json!({"@type": "CreativeWork", "@id": id})
}

pub(crate) fn license(metadata: &Metadata) -> Option<String> {
    metadata
        .rights_list
        .iter()
        .find_map(|r| r.rights_uri.clone().or_else(|| r.rights.clone()))
}

fn place(location: &GeoLocation) -> Option<Value> {
    match location {
        GeoLocation::Point { point, place } => {
            let mut geo = Map::new();
            geo.insert("@type".to_string(), json!("GeoCoordinates"));
            insert_some(&mut geo, "address", place.as_deref());
            geo.insert("latitude".to_string(), json!(point.point_latitude));
            geo.insert("longitude".to_string(), json!(point.point_longitude));
            Some(json!({"@type": "Place", "geo": geo}))
        }
        GeoLocation::Box { bbox, place } => {
            let corners = format!(
                "{} {} {} {}",
                bbox.south_bound_latitude,
                bbox.west_bound_longitude,
                bbox.north_bound_latitude,
                bbox.east_bound_longitude
            );
            let mut node = Map::new();
            node.insert("@type".to_string(), json!("Place"));
            insert_some(&mut node, "name", place.as_deref());
            node.insert("geo".to_string(), json!({"@type": "GeoShape", "box": corners}));
            Some(Value::Object(node))
        }
        GeoLocation::Place(name) => Some(json!({"@type": "Place", "name": name})),
        GeoLocation::Other(_) => None,
    }
}
