//! DataCite XML reader and writer.

use super::{
    KERNEL_MARKER, KERNEL_NAMESPACE, kernel_agent, name_type, periodical_from_issn,
    related_with_issn, resource_type_text, resource_types,
};
use crate::crosswalk::Vocabulary;
use crate::error::{ParseError, WriteError};
use crate::identifier::{doi_from_url, normalize_doi, normalize_id, validate_doi};
use crate::metadata::{
    Agent, AlternateIdentifier, DateEntry, DateType, Description, FundingReference, GeoBox,
    GeoLocation, GeoPoint, Metadata, RelatedIdentifier, Rights, Subject, Title,
};
use crate::xml::{XmlNode, XmlWriter, parse_document};
use crate::{Format, MetadataFormat, Sniff};

/// DataCite kernel XML, `.xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataciteXmlFormat;

impl MetadataFormat for DataciteXmlFormat {
    fn format(&self) -> Format {
        Format::DataciteXml
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.xml_root() == Some("resource")
            && sniff
                .xml_namespaces()
                .iter()
                .any(|ns| ns.contains(KERNEL_MARKER))
    }

    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let root = parse_document(content, Format::DataciteXml)?;
        let resource = if root.name == "resource" {
            &root
        } else {
            root.descendant("resource").unwrap_or(&root)
        };
        Ok(read_resource(resource))
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        write_resource(metadata)
    }
}

fn read_resource(resource: &XmlNode) -> Metadata {
    let mut metadata = Metadata::new();

    if let Some(identifier) = resource.child("identifier") {
        let value = identifier.text().unwrap_or_default();
        match identifier.attr("identifierType") {
            Some(kind) if kind.eq_ignore_ascii_case("DOI") => {
                metadata.doi = doi_from_url(&value);
                metadata.identifier = normalize_doi(&value);
            }
            _ => metadata.identifier = normalize_id(&value),
        }
    }

    metadata.creators = list(resource, "creators", "creator")
        .filter_map(|creator| agent(creator, "creatorName"))
        .collect();
    metadata.titles = list(resource, "titles", "title")
        .filter_map(|title| {
            Some(Title {
                title: title.text()?,
                title_type: title.attr("titleType").map(String::from),
            })
        })
        .collect();
    metadata.publisher = resource.child_text("publisher");
    metadata.publication_year = resource.child_text("publicationYear");

    let resource_type = resource.child("resourceType");
    metadata.types = resource_types(
        resource_type.and_then(|t| t.attr("resourceTypeGeneral")),
        resource_type.and_then(XmlNode::text),
        None,
    );

    metadata.alternate_identifiers = list(resource, "alternateIdentifiers", "alternateIdentifier")
        .filter_map(|alt| {
            Some(AlternateIdentifier {
                alternate_identifier: alt.text()?,
                alternate_identifier_type: alt
                    .attr("alternateIdentifierType")
                    .unwrap_or("Other")
                    .to_string(),
            })
        })
        .collect();
    metadata.subjects = list(resource, "subjects", "subject")
        .filter_map(|subject| {
            Some(Subject {
                subject: subject.text()?,
                subject_scheme: subject.attr("subjectScheme").map(String::from),
            })
        })
        .collect();
    metadata.contributors = list(resource, "contributors", "contributor")
        .filter_map(|contributor| {
            let role = contributor.attr("contributorType").unwrap_or("Other");
            Some(Agent {
                contributor_type: Some(role.to_string()),
                ..agent(contributor, "contributorName")?
            })
        })
        .collect();
    metadata.dates = list(resource, "dates", "date")
        .filter_map(|date| {
            Some(DateEntry {
                date: date.text()?,
                date_type: DateType::parse(date.attr("dateType").unwrap_or_default()),
            })
        })
        .collect();
    metadata.language = resource.child_text("language");

    metadata.related_identifiers = list(resource, "relatedIdentifiers", "relatedIdentifier")
        .filter_map(|related| {
            let value = related.text()?;
            let kind = related.attr("relatedIdentifierType").unwrap_or("URL");
            let value = match kind {
                "DOI" => validate_doi(&value).unwrap_or(value),
                _ => value,
            };
            Some(RelatedIdentifier {
                related_identifier: value,
                related_identifier_type: kind.to_string(),
                relation_type: related.attr("relationType")?.to_string(),
                resource_type_general: related.attr("resourceTypeGeneral").map(String::from),
            })
        })
        .collect();
    periodical_from_issn(&mut metadata);

    metadata.sizes = list(resource, "sizes", "size").filter_map(XmlNode::text).collect();
    metadata.formats = list(resource, "formats", "format").filter_map(XmlNode::text).collect();
    metadata.version = resource.child_text("version");
    metadata.rights_list = list(resource, "rightsList", "rights")
        .map(|rights| Rights {
            rights: rights.text(),
            rights_uri: rights.attr("rightsURI").map(String::from),
        })
        .filter(|rights| rights.rights.is_some() || rights.rights_uri.is_some())
        .collect();
    metadata.descriptions = list(resource, "descriptions", "description")
        .filter_map(|description| {
            Some(Description {
                description: description.deep_text()?,
                description_type: description.attr("descriptionType").map(String::from),
            })
        })
        .collect();
    metadata.geo_locations = list(resource, "geoLocations", "geoLocation")
        .filter_map(geo_location)
        .collect();
    metadata.funding_references = list(resource, "fundingReferences", "fundingReference")
        .filter_map(|funding| {
            let identifier = funding.child("funderIdentifier");
            Some(FundingReference {
                funder_name: funding.child_text("funderName")?,
                funder_identifier: identifier.and_then(XmlNode::text),
                funder_identifier_type: identifier
                    .and_then(|i| i.attr("funderIdentifierType"))
                    .map(String::from),
                award_number: funding.child_text("awardNumber"),
                award_title: funding.child_text("awardTitle"),
            })
        })
        .collect();

    metadata.schema_version = resource
        .attr("xmlns")
        .filter(|ns| ns.contains(KERNEL_MARKER))
        .map(String::from);

    metadata
}

/// Items of a kernel wrapper element, e.g. `<creators><creator/>...`.
fn list<'a>(resource: &'a XmlNode, wrapper: &'a str, item: &'a str) -> impl Iterator<Item = &'a XmlNode> {
    resource
        .child(wrapper)
        .into_iter()
        .flat_map(move |w| w.children_named(item))
}

fn agent(node: &XmlNode, name_element: &str) -> Option<Agent> {
    let name = node.child(name_element);
    let identifier = node.child("nameIdentifier").and_then(|id| {
        Some((
            id.text()?,
            id.attr("nameIdentifierScheme").map(String::from),
        ))
    });
    kernel_agent(
        name.and_then(XmlNode::text),
        name.and_then(|n| n.attr("nameType")),
        node.child_text("givenName"),
        node.child_text("familyName"),
        identifier,
    )
}

fn geo_location(node: &XmlNode) -> Option<GeoLocation> {
    let place = node.child_text("geoLocationPlace");
    if let Some(point) = node.child("geoLocationPoint") {
        let point = match (point.child_text("pointLatitude"), point.child_text("pointLongitude")) {
            (Some(point_latitude), Some(point_longitude)) => GeoPoint {
                point_latitude,
                point_longitude,
            },
            // kernel-3 writes "lat lon"
            _ => {
                let text = point.text()?;
                let (lat, lon) = text.split_once(char::is_whitespace)?;
                GeoPoint {
                    point_latitude: lat.trim().to_string(),
                    point_longitude: lon.trim().to_string(),
                }
            }
        };
        return Some(GeoLocation::Point { point, place });
    }
    if let Some(bbox) = node.child("geoLocationBox") {
        let bbox = match bbox.child_text("westBoundLongitude") {
            Some(west_bound_longitude) => GeoBox {
                west_bound_longitude,
                east_bound_longitude: bbox.child_text("eastBoundLongitude")?,
                south_bound_latitude: bbox.child_text("southBoundLatitude")?,
                north_bound_latitude: bbox.child_text("northBoundLatitude")?,
            },
            None => {
                let corners: Vec<String> = bbox
                    .text()?
                    .split_whitespace()
                    .map(String::from)
                    .collect();
                let [south, west, north, east] = <[String; 4]>::try_from(corners).ok()?;
                GeoBox {
                    west_bound_longitude: west,
                    east_bound_longitude: east,
                    south_bound_latitude: south,
                    north_bound_latitude: north,
                }
            }
        };
        return Some(GeoLocation::Box { bbox, place });
    }
    place.map(GeoLocation::Place)
}

fn write_resource(metadata: &Metadata) -> Result<String, WriteError> {
    let mut w = XmlWriter::new(Format::DataciteXml)?;
    let schema_location = format!(
        "{KERNEL_NAMESPACE} http://schema.datacite.org/meta/kernel-4/metadata.xsd"
    );
    w.start(
        "resource",
        &[
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xmlns", KERNEL_NAMESPACE),
            ("xsi:schemaLocation", schema_location.as_str()),
        ],
    )?;

    let doi = metadata.doi.clone().or_else(|| metadata.doi_name());
    match (&doi, &metadata.identifier) {
        (Some(doi), _) => w.element("identifier", &[("identifierType", "DOI")], doi)?,
        (None, Some(identifier)) => w.element("identifier", &[("identifierType", "URL")], identifier)?,
        (None, None) => {}
    }

    if !metadata.creators.is_empty() {
        w.start("creators", &[])?;
        for creator in &metadata.creators {
            write_agent(&mut w, "creator", "creatorName", creator, &[])?;
        }
        w.end("creators")?;
    }

    if !metadata.titles.is_empty() {
        w.start("titles", &[])?;
        for title in &metadata.titles {
            let attrs: Vec<(&str, &str)> = title
                .title_type
                .as_deref()
                .map(|t| ("titleType", t))
                .into_iter()
                .collect();
            w.element("title", &attrs, &title.title)?;
        }
        w.end("titles")?;
    }

    w.optional("publisher", metadata.publisher.as_deref())?;
    w.optional("publicationYear", metadata.year())?;
    w.element(
        "resourceType",
        &[(
            "resourceTypeGeneral",
            metadata.type_in(Vocabulary::ResourceTypeGeneral),
        )],
        resource_type_text(metadata).unwrap_or_default(),
    )?;

    if !metadata.subjects.is_empty() {
        w.start("subjects", &[])?;
        for subject in &metadata.subjects {
            let attrs: Vec<(&str, &str)> = subject
                .subject_scheme
                .as_deref()
                .map(|s| ("subjectScheme", s))
                .into_iter()
                .collect();
            w.element("subject", &attrs, &subject.subject)?;
        }
        w.end("subjects")?;
    }

    if !metadata.contributors.is_empty() {
        w.start("contributors", &[])?;
        for contributor in &metadata.contributors {
            let role = contributor.contributor_type.as_deref().unwrap_or("Other");
            write_agent(
                &mut w,
                "contributor",
                "contributorName",
                contributor,
                &[("contributorType", role)],
            )?;
        }
        w.end("contributors")?;
    }

    if !metadata.dates.is_empty() {
        w.start("dates", &[])?;
        for date in &metadata.dates {
            w.element("date", &[("dateType", date.date_type.as_str())], &date.date)?;
        }
        w.end("dates")?;
    }

    w.optional("language", metadata.language.as_deref())?;

    if !metadata.alternate_identifiers.is_empty() {
        w.start("alternateIdentifiers", &[])?;
        for alt in &metadata.alternate_identifiers {
            w.element(
                "alternateIdentifier",
                &[("alternateIdentifierType", alt.alternate_identifier_type.as_str())],
                &alt.alternate_identifier,
            )?;
        }
        w.end("alternateIdentifiers")?;
    }

    let related = related_with_issn(metadata);
    if !related.is_empty() {
        w.start("relatedIdentifiers", &[])?;
        for r in &related {
            let mut attrs = vec![
                ("relatedIdentifierType", r.related_identifier_type.as_str()),
                ("relationType", r.relation_type.as_str()),
            ];
            if let Some(general) = r.resource_type_general.as_deref() {
                attrs.push(("resourceTypeGeneral", general));
            }
            w.element("relatedIdentifier", &attrs, &r.related_identifier)?;
        }
        w.end("relatedIdentifiers")?;
    }

    write_list(&mut w, "sizes", "size", &metadata.sizes)?;
    write_list(&mut w, "formats", "format", &metadata.formats)?;
    w.optional("version", metadata.version.as_deref())?;

    if !metadata.rights_list.is_empty() {
        w.start("rightsList", &[])?;
        for rights in &metadata.rights_list {
            let attrs: Vec<(&str, &str)> = rights
                .rights_uri
                .as_deref()
                .map(|uri| ("rightsURI", uri))
                .into_iter()
                .collect();
            match rights.rights.as_deref() {
                Some(text) => w.element("rights", &attrs, text)?,
                None => w.empty("rights", &attrs)?,
            }
        }
        w.end("rightsList")?;
    }

    if !metadata.descriptions.is_empty() {
        w.start("descriptions", &[])?;
        for description in &metadata.descriptions {
            let kind = description.description_type.as_deref().unwrap_or("Abstract");
            w.element(
                "description",
                &[("descriptionType", kind)],
                &description.description,
            )?;
        }
        w.end("descriptions")?;
    }

    let locations: Vec<&GeoLocation> = metadata
        .geo_locations
        .iter()
        .filter(|l| !matches!(l, GeoLocation::Other(_)))
        .collect();
    if !locations.is_empty() {
        w.start("geoLocations", &[])?;
        for location in locations {
            write_geo_location(&mut w, location)?;
        }
        w.end("geoLocations")?;
    }

    if !metadata.funding_references.is_empty() {
        w.start("fundingReferences", &[])?;
        for funding in &metadata.funding_references {
            w.start("fundingReference", &[])?;
            w.element("funderName", &[], &funding.funder_name)?;
            if let Some(identifier) = funding.funder_identifier.as_deref() {
                let kind = funding.funder_identifier_type.as_deref().unwrap_or("Other");
                w.element("funderIdentifier", &[("funderIdentifierType", kind)], identifier)?;
            }
            w.optional("awardNumber", funding.award_number.as_deref())?;
            w.optional("awardTitle", funding.award_title.as_deref())?;
            w.end("fundingReference")?;
        }
        w.end("fundingReferences")?;
    }

    w.end("resource")?;
    w.finish()
}

fn write_agent(
    w: &mut XmlWriter,
    element: &str,
    name_element: &str,
    agent: &Agent,
    attrs: &[(&str, &str)],
) -> Result<(), WriteError> {
    w.start(element, attrs)?;
    let name_attrs: Vec<(&str, &str)> =
        name_type(agent).map(|t| ("nameType", t)).into_iter().collect();
    w.element(name_element, &name_attrs, &agent.name)?;
    w.optional("givenName", agent.given_name.as_deref())?;
    w.optional("familyName", agent.family_name.as_deref())?;
    if let Some(identifier) = agent.identifier.as_deref() {
        let scheme = if identifier.contains("orcid.org") { "ORCID" } else { "URL" };
        w.element(
            "nameIdentifier",
            &[("nameIdentifierScheme", scheme)],
            identifier,
        )?;
    }
    w.end(element)
}

fn write_list(w: &mut XmlWriter, wrapper: &str, item: &str, values: &[String]) -> Result<(), WriteError> {
    if values.is_empty() {
        return Ok(());
    }
    w.start(wrapper, &[])?;
    for value in values {
        w.element(item, &[], value)?;
    }
    w.end(wrapper)
}

fn write_geo_location(w: &mut XmlWriter, location: &GeoLocation) -> Result<(), WriteError> {
    w.start("geoLocation", &[])?;
    w.optional("geoLocationPlace", location.place())?;
    match location {
        GeoLocation::Point { point, .. } => {
            w.start("geoLocationPoint", &[])?;
            w.element("pointLongitude", &[], &point.point_longitude)?;
            w.element("pointLatitude", &[], &point.point_latitude)?;
            w.end("geoLocationPoint")?;
        }
        GeoLocation::Box { bbox, .. } => {
            w.start("geoLocationBox", &[])?;
            w.element("westBoundLongitude", &[], &bbox.west_bound_longitude)?;
            w.element("eastBoundLongitude", &[], &bbox.east_bound_longitude)?;
            w.element("southBoundLatitude", &[], &bbox.south_bound_latitude)?;
            w.element("northBoundLatitude", &[], &bbox.north_bound_latitude)?;
            w.end("geoLocationBox")?;
        }
        GeoLocation::Place(_) | GeoLocation::Other(_) => {}
    }
    w.end("geoLocation")
}
