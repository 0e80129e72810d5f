//! The canonical record every reader populates and every writer consumes.
//!
//! Field declaration order matters: JSON writers that render these types emit
//! keys in this order.

use crate::crosswalk::{Vocabulary, translate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unified metadata for one scholarly work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Normalized resolver URL, the record's single source of truth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// DOI exactly as the source wrote it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Landing page exactly as the source wrote it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Types::is_empty")]
    pub types: Types,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<Agent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Agent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<Title>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<Description>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<Subject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<DateEntry>,
    /// Explicit publication year; see [`Metadata::year`] for the derived value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodical: Option<Container>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_identifiers: Vec<RelatedIdentifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternate_identifiers: Vec<AlternateIdentifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funding_references: Vec<FundingReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geo_locations: Vec<GeoLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rights_list: Vec<Rights>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_url: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Diagnostics from the validator and linter collaborators.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Metadata {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record is valid when it has an identifier and no diagnostics.
    pub fn is_valid(&self) -> bool {
        self.identifier.is_some() && self.errors.is_empty()
    }

    /// True when no descriptive field is populated.
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none()
            && self.doi.is_none()
            && self.url.is_none()
            && self.titles.is_empty()
            && self.creators.is_empty()
            && self.publisher.is_none()
            && self.descriptions.is_empty()
            && self.dates.is_empty()
    }

    /// Publication year: the explicit field wins, the first `Issued` date is
    /// the fallback.
    pub fn year(&self) -> Option<&str> {
        self.publication_year.as_deref().or_else(|| {
            self.date_of(DateType::Issued)
                .and_then(|date| date.get(..4))
                .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
        })
    }

    /// First date of the given type.
    pub fn date_of(&self, date_type: DateType) -> Option<&str> {
        self.dates
            .iter()
            .find(|d| d.date_type == date_type)
            .map(|d| d.date.as_str())
    }

    /// First title.
    pub fn title(&self) -> Option<&str> {
        self.titles.first().map(|t| t.title.as_str())
    }

    /// First description, preferring an `Abstract`.
    pub fn abstract_text(&self) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|d| d.description_type.as_deref() == Some("Abstract"))
            .or_else(|| self.descriptions.first())
            .map(|d| d.description.as_str())
    }

    /// The bare DOI behind `identifier`, lower-cased.
    pub fn doi_name(&self) -> Option<String> {
        self.identifier
            .as_deref()
            .and_then(crate::identifier::validate_doi)
    }

    /// Type term for `vocabulary`, derived from the pivot when the record has
    /// no entry for it.
    pub fn type_in(&self, vocabulary: Vocabulary) -> &'static str {
        match self.types.get(vocabulary) {
            Some(term) => translate(vocabulary, vocabulary, term),
            None => translate(
                Vocabulary::LinkedData,
                vocabulary,
                self.types.schema_org.as_deref().unwrap_or_default(),
            ),
        }
    }

    /// Adds a date unless the value is blank.
    pub(crate) fn push_date(&mut self, date: Option<String>, date_type: DateType) {
        if let Some(date) = date.filter(|d| !d.trim().is_empty()) {
            self.dates.push(DateEntry { date, date_type });
        }
    }
}

/// Type terms of a record, one per vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Types {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibtex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citeproc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ris: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type_general: Option<String>,
    /// Free-text resource type; not a controlled vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl Types {
    /// Populates every vocabulary from one source term.
    ///
    /// The source vocabulary keeps its term (or its fallback when the term is
    /// unrecognized); all other entries are translated from the pivot, so the
    /// entries always agree through the crosswalk.
    pub fn from_source(vocabulary: Vocabulary, term: &str) -> Self {
        let pivot = translate(vocabulary, Vocabulary::LinkedData, term);
        let entry = |target: Vocabulary| {
            if target == vocabulary {
                translate(vocabulary, vocabulary, term).to_string()
            } else {
                translate(Vocabulary::LinkedData, target, pivot).to_string()
            }
        };
        Self {
            schema_org: Some(entry(Vocabulary::LinkedData)),
            bibtex: Some(entry(Vocabulary::Bibliography)),
            citeproc: Some(entry(Vocabulary::CitationStyle)),
            ris: Some(entry(Vocabulary::CitationTag)),
            resource_type_general: Some(entry(Vocabulary::ResourceTypeGeneral)),
            resource_type: None,
        }
    }

    /// Sets the free-text resource type, ignoring blanks.
    pub fn with_resource_type(mut self, resource_type: Option<String>) -> Self {
        self.resource_type = resource_type.filter(|t| !t.trim().is_empty());
        self
    }

    /// The entry stored for `vocabulary`, if the record carries one.
    pub fn get(&self, vocabulary: Vocabulary) -> Option<&str> {
        match vocabulary {
            Vocabulary::LinkedData => self.schema_org.as_deref(),
            Vocabulary::Bibliography => self.bibtex.as_deref(),
            Vocabulary::CitationStyle => self.citeproc.as_deref(),
            Vocabulary::CitationTag => self.ris.as_deref(),
            Vocabulary::ResourceTypeGeneral => self.resource_type_general.as_deref(),
            Vocabulary::RegistryWorkType => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Person,
    Organization,
}

/// A creator or contributor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// `None` when the source does not say.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AgentKind>,
    /// Normalized ORCID or other identifier URL.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Role, for contributors only (`Editor`, `ContactPerson`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_type: Option<String>,
}

impl Agent {
    pub fn person(given_name: Option<String>, family_name: Option<String>) -> Self {
        let name = [given_name.as_deref(), family_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            kind: Some(AgentKind::Person),
            name,
            given_name,
            family_name,
            ..Self::default()
        }
    }

    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            kind: Some(AgentKind::Organization),
            name: name.into(),
            ..Self::default()
        }
    }

    /// "Family, Given" when both parts are known, the plain name otherwise.
    pub fn sort_name(&self) -> String {
        match (&self.family_name, &self.given_name) {
            (Some(family), Some(given)) => format!("{family}, {given}"),
            (Some(family), None) => family.clone(),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_type: Option<String>,
}

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_type: Option<String>,
}

impl Description {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            description_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_scheme: Option<String>,
}

impl Subject {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            subject_scheme: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateType {
    Issued,
    Created,
    Updated,
    Submitted,
    Accepted,
    Valid,
    Available,
    Withdrawn,
    #[serde(other)]
    Other,
}

impl DateType {
    pub fn as_str(self) -> &'static str {
        match self {
            DateType::Issued => "Issued",
            DateType::Created => "Created",
            DateType::Updated => "Updated",
            DateType::Submitted => "Submitted",
            DateType::Accepted => "Accepted",
            DateType::Valid => "Valid",
            DateType::Available => "Available",
            DateType::Withdrawn => "Withdrawn",
            DateType::Other => "Other",
        }
    }

    /// Unknown names map to `Other`.
    pub fn parse(name: &str) -> Self {
        match name {
            "Issued" => DateType::Issued,
            "Created" => DateType::Created,
            "Updated" => DateType::Updated,
            "Submitted" => DateType::Submitted,
            "Accepted" => DateType::Accepted,
            "Valid" => DateType::Valid,
            "Available" => DateType::Available,
            "Withdrawn" => DateType::Withdrawn,
            _ => DateType::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateEntry {
    pub date: String,
    pub date_type: DateType,
}

/// The journal, catalog or other container a work was published in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<String>,
}

impl Container {
    /// `Some` only when at least one field is set.
    pub(crate) fn non_empty(self) -> Option<Self> {
        if self == Self::default() { None } else { Some(self) }
    }

    /// "first-last", or whichever page is known.
    pub fn pages(&self) -> Option<String> {
        match (&self.first_page, &self.last_page) {
            (Some(first), Some(last)) => Some(format!("{first}-{last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Splits a "first-last" page range, completing abbreviated last pages.
    pub(crate) fn set_pages(&mut self, pages: &str) {
        let pages = pages.trim().replace("--", "-").replace('–', "-");
        let pages = crate::utils::format_page_numbers(&pages);
        let mut parts = pages.splitn(2, '-');
        self.first_page = parts
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);
        self.last_page = parts
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedIdentifier {
    pub related_identifier: String,
    pub related_identifier_type: String,
    pub relation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type_general: Option<String>,
}

impl RelatedIdentifier {
    /// Builds an entry from a DOI or URL, typed by its shape.
    pub fn from_id(id: &str, relation_type: &str) -> Option<Self> {
        let (related_identifier, related_identifier_type) =
            match crate::identifier::validate_doi(id) {
                Some(doi) => (doi, "DOI"),
                None => (crate::identifier::normalize_url(id)?, "URL"),
            };
        Some(Self {
            related_identifier,
            related_identifier_type: related_identifier_type.to_string(),
            relation_type: relation_type.to_string(),
            resource_type_general: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateIdentifier {
    pub alternate_identifier: String,
    pub alternate_identifier_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingReference {
    pub funder_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funder_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funder_identifier_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(rename = "rightsUri", skip_serializing_if = "Option::is_none")]
    pub rights_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub point_latitude: String,
    pub point_longitude: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBox {
    pub west_bound_longitude: String,
    pub east_bound_longitude: String,
    pub south_bound_latitude: String,
    pub north_bound_latitude: String,
}

/// A spatial location. Points and boxes may carry a place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GeoLocationRepr", into = "GeoLocationRepr")]
pub enum GeoLocation {
    Point {
        point: GeoPoint,
        place: Option<String>,
    },
    Box {
        bbox: GeoBox,
        place: Option<String>,
    },
    Place(String),
    /// Shapes this crate does not model, kept verbatim.
    Other(Map<String, Value>),
}

impl GeoLocation {
    pub fn place(&self) -> Option<&str> {
        match self {
            GeoLocation::Point { place, .. } | GeoLocation::Box { place, .. } => place.as_deref(),
            GeoLocation::Place(place) => Some(place),
            GeoLocation::Other(_) => None,
        }
    }
}

/// Wire shape shared by the DataCite JSON and XML vocabularies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoLocationRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    geo_location_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geo_location_point: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geo_location_box: Option<GeoBox>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl From<GeoLocationRepr> for GeoLocation {
    fn from(repr: GeoLocationRepr) -> Self {
        match repr {
            GeoLocationRepr {
                geo_location_point: Some(point),
                geo_location_place: place,
                ..
            } => GeoLocation::Point { point, place },
            GeoLocationRepr {
                geo_location_box: Some(bbox),
                geo_location_place: place,
                ..
            } => GeoLocation::Box { bbox, place },
            GeoLocationRepr {
                geo_location_place: Some(place),
                ..
            } => GeoLocation::Place(place),
            GeoLocationRepr { other, .. } => GeoLocation::Other(other),
        }
    }
}

impl From<GeoLocation> for GeoLocationRepr {
    fn from(location: GeoLocation) -> Self {
        match location {
            GeoLocation::Point { point, place } => Self {
                geo_location_place: place,
                geo_location_point: Some(point),
                ..Self::default()
            },
            GeoLocation::Box { bbox, place } => Self {
                geo_location_place: place,
                geo_location_box: Some(bbox),
                ..Self::default()
            },
            GeoLocation::Place(place) => Self {
                geo_location_place: Some(place),
                ..Self::default()
            },
            GeoLocation::Other(other) => Self {
                other,
                ..Self::default()
            },
        }
    }
}
