//! CSL-JSON (citeproc) reader and writer.
//!
//! # Example
//!
//! ```
//! use bibmeta::{CiteprocFormat, MetadataFormat};
//!
//! let input = r#"{
//!   "type": "article-journal",
//!   "id": "https://doi.org/10.1000/example",
//!   "title": "Example Title",
//!   "author": [{"family": "Smith", "given": "John"}],
//!   "issued": {"date-parts": [[2020, 3]]}
//! }"#;
//!
//! let metadata = CiteprocFormat.parse(input).unwrap();
//! assert_eq!(metadata.title(), Some("Example Title"));
//! assert_eq!(metadata.year(), Some("2020"));
//! assert_eq!(metadata.types.bibtex.as_deref(), Some("article"));
//! ```

use crate::crosswalk::Vocabulary;
use crate::error::{ParseError, WriteError};
use crate::identifier::{doi_from_url, normalize_doi, normalize_id, normalize_orcid, normalize_url};
use crate::json::{self, first_of, get_text};
use crate::metadata::{
    Agent, AgentKind, Container, DateType, Description, Metadata, Rights, Subject, Title, Types,
};
use crate::utils::{date_from_parts, date_parts, split_keywords};
use crate::{Format, MetadataFormat, Sniff};
use serde::Serialize;
use serde_json::{Map, Value};

/// `id` of an item whose record has neither identifier nor url.
const PLACEHOLDER_ID: &str = "item1";

/// CSL-JSON items, `.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CiteprocFormat;

impl MetadataFormat for CiteprocFormat {
    fn format(&self) -> Format {
        Format::Citeproc
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.json().is_some_and(|map| {
            !map.contains_key("@context")
                && map.get("type").is_some_and(Value::is_string)
                && (map.contains_key("id") || map.get("author").is_some_and(Value::is_array))
        })
    }

    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let item = json::parse_object(content, Format::Citeproc)?;
        Ok(read_item(&item))
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        json::to_pretty(&CslItem::from(metadata), Format::Citeproc)
    }
}

fn read_item(item: &Map<String, Value>) -> Metadata {
    let mut metadata = Metadata::new();

    let item_type = get_text(item, "type").unwrap_or_default();
    metadata.types = Types::from_source(Vocabulary::CitationStyle, &item_type);

    let doi = get_text(item, "DOI");
    metadata.identifier = doi
        .as_deref()
        .and_then(normalize_doi)
        .or_else(|| get_text(item, "id").as_deref().and_then(normalize_id));
    metadata.doi = doi.as_deref().and_then(doi_from_url);
    metadata.url = get_text(item, "URL");

    metadata.creators = names(item.get("author"));
    metadata.contributors = names(item.get("editor"))
        .into_iter()
        .map(|agent| Agent {
            contributor_type: Some("Editor".to_string()),
            ..agent
        })
        .collect();

    if let Some(title) = first_of(item.get("title")) {
        metadata.titles.push(Title::new(title));
    }
    if let Some(abstract_text) = get_text(item, "abstract") {
        metadata.descriptions.push(Description {
            description: abstract_text,
            description_type: Some("Abstract".to_string()),
        });
    }

    let mut subjects: Vec<String> = json::texts(item.get("categories"));
    if let Some(keywords) = get_text(item, "keyword") {
        subjects.extend(split_keywords(&keywords));
    }
    metadata.subjects = subjects.into_iter().map(Subject::new).collect();

    metadata.push_date(read_date(item.get("issued")), DateType::Issued);
    metadata.push_date(read_date(item.get("submitted")), DateType::Submitted);
    metadata.push_date(read_date(item.get("accessed")), DateType::Available);

    metadata.publisher = get_text(item, "publisher");
    let container_title = first_of(item.get("container-title"));
    let mut periodical = Container {
        container_type: container_title
            .as_ref()
            .map(|_| container_type(&item_type).to_string()),
        title: container_title,
        issn: first_of(item.get("ISSN")),
        volume: get_text(item, "volume"),
        issue: get_text(item, "issue"),
        ..Container::default()
    };
    if let Some(page) = get_text(item, "page") {
        periodical.set_pages(&page);
    }
    metadata.periodical = periodical.non_empty();

    if let Some(copyright) = get_text(item, "copyright") {
        metadata.rights_list.push(match normalize_url(&copyright) {
            Some(_) => Rights {
                rights: None,
                rights_uri: Some(copyright),
            },
            None => Rights {
                rights: Some(copyright),
                rights_uri: None,
            },
        });
    }
    metadata.version = get_text(item, "version");
    metadata.language = get_text(item, "language");

    metadata
}

fn names(value: Option<&Value>) -> Vec<Agent> {
    json::as_list(value)
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|name| {
            let mut agent = match (get_text(name, "family"), get_text(name, "given")) {
                (None, None) => Agent {
                    name: get_text(name, "literal").or_else(|| get_text(name, "name"))?,
                    ..Agent::default()
                },
                (family, given) => Agent::person(given, family),
            };
            agent.identifier = get_text(name, "ORCID").as_deref().and_then(normalize_orcid);
            Some(agent)
        })
        .collect()
}

/// A CSL date object: `date-parts` first, then `raw` or `literal`.
pub(crate) fn read_date(value: Option<&Value>) -> Option<String> {
    let date = value?.as_object()?;
    let parts: Vec<i64> = date
        .get("date-parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.as_i64().or_else(|| p.as_str().and_then(|s| s.parse().ok())))
                .collect()
        })
        .unwrap_or_default();
    date_from_parts(&parts)
        .or_else(|| get_text(date, "raw"))
        .or_else(|| get_text(date, "literal"))
}

fn container_type(item_type: &str) -> &'static str {
    match item_type {
        "article-journal" | "article" => "Journal",
        "post-weblog" => "Blog",
        "chapter" => "Book",
        "paper-conference" => "Proceedings",
        _ => "Periodical",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct CslItem<'a> {
    #[serde(rename = "type")]
    item_type: &'static str,
    id: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    author: Vec<CslName<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    editor: Vec<CslName<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issued: Option<CslDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    submitted: Option<CslDate>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    abstract_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container_title: Option<&'a str>,
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    #[serde(rename = "ISSN", skip_serializing_if = "Option::is_none")]
    issn: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CslName<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    family: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    given: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    literal: Option<&'a str>,
    #[serde(rename = "ORCID", skip_serializing_if = "Option::is_none")]
    orcid: Option<&'a str>,
}

impl<'a> From<&'a Agent> for CslName<'a> {
    fn from(agent: &'a Agent) -> Self {
        let structured = agent.kind != Some(AgentKind::Organization) && agent.family_name.is_some();
        Self {
            family: agent.family_name.as_deref().filter(|_| structured),
            given: agent.given_name.as_deref().filter(|_| structured),
            literal: (!structured).then_some(agent.name.as_str()),
            orcid: agent
                .identifier
                .as_deref()
                .filter(|id| id.contains("orcid.org")),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CslDate {
    #[serde(rename = "date-parts", skip_serializing_if = "Option::is_none")]
    date_parts: Option<Vec<Vec<i64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    literal: Option<String>,
}

impl CslDate {
    pub(crate) fn new(date: &str) -> Self {
        let parts = date_parts(date);
        if parts.is_empty() {
            Self {
                date_parts: None,
                literal: Some(date.to_string()),
            }
        } else {
            Self {
                date_parts: Some(vec![parts]),
                literal: None,
            }
        }
    }
}

impl<'a> From<&'a Metadata> for CslItem<'a> {
    fn from(metadata: &'a Metadata) -> Self {
        let periodical = metadata.periodical.as_ref();
        Self {
            item_type: metadata.type_in(Vocabulary::CitationStyle),
            id: metadata
                .identifier
                .as_deref()
                .or(metadata.url.as_deref())
                .unwrap_or(PLACEHOLDER_ID),
            categories: metadata.subjects.iter().map(|s| s.subject.as_str()).collect(),
            language: metadata.language.as_deref(),
            author: metadata.creators.iter().map(CslName::from).collect(),
            editor: metadata
                .contributors
                .iter()
                .filter(|c| c.contributor_type.as_deref() == Some("Editor"))
                .map(CslName::from)
                .collect(),
            issued: metadata
                .date_of(DateType::Issued)
                .or(metadata.year())
                .map(CslDate::new),
            submitted: metadata.date_of(DateType::Submitted).map(CslDate::new),
            abstract_text: metadata.abstract_text(),
            container_title: periodical.and_then(|p| p.title.as_deref()),
            doi: metadata.doi.clone().or_else(|| metadata.doi_name()),
            issn: periodical.and_then(|p| p.issn.as_deref()),
            volume: periodical.and_then(|p| p.volume.as_deref()),
            issue: periodical.and_then(|p| p.issue.as_deref()),
            page: periodical.and_then(|p| p.pages()),
            publisher: metadata.publisher.as_deref(),
            title: metadata.title(),
            url: metadata.url.as_deref(),
            copyright: metadata
                .rights_list
                .first()
                .and_then(|r| r.rights_uri.as_deref().or(r.rights.as_deref())),
            version: metadata.version.as_deref(),
        }
    }
}
