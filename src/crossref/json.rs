//! Crossref REST API work messages.

use super::{container_type, funder, strip_markup, work_type, work_types};
use crate::citeproc::{CslDate, read_date};
use crate::crosswalk::Vocabulary;
use crate::error::{ParseError, WriteError};
use crate::identifier::{doi_from_url, normalize_doi, normalize_id, normalize_orcid, validate_doi};
use crate::json::{self, first_of, get_text, object};
use crate::metadata::{
    Agent, AgentKind, Container, DateType, Description, Metadata, RelatedIdentifier, Rights,
    Subject, Title, Types,
};
use crate::utils::agent_from_name;
use crate::{Format, MetadataFormat, Sniff};
use serde::Serialize;
use serde_json::{Map, Value};

/// Crossref REST API response for a single work, `.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossrefJsonFormat;

impl MetadataFormat for CrossrefJsonFormat {
    fn format(&self) -> Format {
        Format::CrossrefJson
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.json().is_some_and(|map| {
            map.contains_key("message-type") && map.get("message").is_some_and(Value::is_object)
        })
    }

    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let root = json::parse_object(content, Format::CrossrefJson)?;
        let message = object(&root, "message").unwrap_or(&root);
        Ok(read_message(message))
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        let response = WorkResponse {
            status: "ok",
            message_type: "work",
            message: WorkMessage::from(metadata),
        };
        json::to_pretty(&response, Format::CrossrefJson)
    }
}

fn read_message(message: &Map<String, Value>) -> Metadata {
    let mut metadata = Metadata::new();

    let crossref_type = get_text(message, "type");
    metadata.types = match crossref_type.as_deref() {
        Some(term) => work_types(term),
        None => Types::from_source(Vocabulary::RegistryWorkType, "other"),
    };

    let doi = get_text(message, "DOI");
    metadata.url = get_text(message, "URL");
    metadata.identifier = doi
        .as_deref()
        .and_then(normalize_doi)
        .or_else(|| metadata.url.as_deref().and_then(normalize_id));
    metadata.doi = doi.as_deref().and_then(doi_from_url);

    if let Some(title) = first_of(message.get("title")) {
        metadata.titles.push(Title::new(title));
    }
    if let Some(subtitle) = first_of(message.get("subtitle")) {
        metadata.titles.push(Title {
            title: subtitle,
            title_type: Some("Subtitle".to_string()),
        });
    }

    metadata.creators = names(message.get("author"));
    metadata.contributors = names(message.get("editor"))
        .into_iter()
        .map(|agent| Agent {
            contributor_type: Some("Editor".to_string()),
            ..agent
        })
        .collect();

    if let Some(abstract_text) = get_text(message, "abstract").as_deref().and_then(strip_markup) {
        metadata.descriptions.push(Description {
            description: abstract_text,
            description_type: Some("Abstract".to_string()),
        });
    }

    let container_title = first_of(message.get("container-title"));
    let mut periodical = Container {
        container_type: container_title
            .as_ref()
            .map(|_| container_type(crossref_type.as_deref().unwrap_or_default()).to_string()),
        title: container_title,
        issn: first_of(message.get("ISSN")),
        volume: get_text(message, "volume"),
        issue: get_text(message, "issue"),
        ..Container::default()
    };
    if let Some(page) = get_text(message, "page") {
        periodical.set_pages(&page);
    }
    metadata.periodical = periodical.non_empty();
    metadata.publisher = get_text(message, "publisher");

    let issued = ["issued", "published-print", "published-online"]
        .iter()
        .find_map(|key| read_date(message.get(*key)));
    metadata.push_date(issued, DateType::Issued);
    metadata.push_date(read_date(message.get("created")), DateType::Created);
    metadata.push_date(read_date(message.get("deposited")), DateType::Updated);

    metadata.related_identifiers = json::as_list(message.get("reference"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|reference| get_text(reference, "DOI"))
        .filter_map(|doi| RelatedIdentifier::from_id(&doi, "References"))
        .collect();

    metadata.funding_references = json::as_list(message.get("funder"))
        .into_iter()
        .filter_map(Value::as_object)
        .flat_map(|entry| {
            let Some(name) = get_text(entry, "name") else {
                return Vec::new();
            };
            let doi = get_text(entry, "DOI");
            let awards = json::texts(entry.get("award"));
            if awards.is_empty() {
                return vec![funder(name, doi.as_deref(), None)];
            }
            awards
                .into_iter()
                .map(|award| funder(name.clone(), doi.as_deref(), Some(award)))
                .collect()
        })
        .collect();

    metadata.rights_list = json::as_list(message.get("license"))
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|license| get_text(license, "URL"))
        .map(|uri| Rights {
            rights: None,
            rights_uri: Some(uri),
        })
        .collect();

    metadata.language = get_text(message, "language");
    metadata.subjects = json::texts(message.get("subject"))
        .into_iter()
        .map(Subject::new)
        .collect();
    metadata
}

fn names(value: Option<&Value>) -> Vec<Agent> {
    json::as_list(value)
        .into_iter()
        .filter_map(Value::as_object)
        .filter_map(|name| {
            let mut agent = match (get_text(name, "given"), get_text(name, "family")) {
                (None, None) => agent_from_name(&get_text(name, "name")?),
                (given, family) => Agent::person(given, family),
            };
            agent.identifier = get_text(name, "ORCID").as_deref().and_then(normalize_orcid);
            Some(agent)
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct WorkResponse<'a> {
    status: &'static str,
    message_type: &'static str,
    message: WorkMessage<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct WorkMessage<'a> {
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    #[serde(rename = "type")]
    work_type: &'a str,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    title: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subtitle: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    author: Vec<WorkAgent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    editor: Vec<WorkAgent<'a>>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    container_title: Vec<&'a str>,
    #[serde(rename = "ISSN", skip_serializing_if = "Vec::is_empty")]
    issn: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issued: Option<CslDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<CslDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deposited: Option<CslDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reference: Vec<WorkReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    funder: Vec<WorkFunder<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    license: Vec<WorkLicense<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subject: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct WorkAgent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    given: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    family: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "ORCID", skip_serializing_if = "Option::is_none")]
    orcid: Option<&'a str>,
    sequence: &'static str,
}

impl<'a> WorkAgent<'a> {
    fn new(agent: &'a Agent, index: usize) -> Self {
        let structured = agent.kind != Some(AgentKind::Organization) && agent.family_name.is_some();
        Self {
            given: agent.given_name.as_deref().filter(|_| structured),
            family: agent.family_name.as_deref().filter(|_| structured),
            name: (!structured).then_some(agent.name.as_str()),
            orcid: agent
                .identifier
                .as_deref()
                .filter(|id| id.contains("orcid.org")),
            sequence: if index == 0 { "first" } else { "additional" },
        }
    }
}

#[derive(Debug, Serialize)]
struct WorkReference {
    key: String,
    #[serde(rename = "DOI")]
    doi: String,
}

#[derive(Debug, Serialize)]
struct WorkFunder<'a> {
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    award: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct WorkLicense<'a> {
    #[serde(rename = "URL")]
    url: &'a str,
}

impl<'a> From<&'a Metadata> for WorkMessage<'a> {
    fn from(metadata: &'a Metadata) -> Self {
        let periodical = metadata.periodical.as_ref();
        let titles_of = |subtitles: bool| -> Vec<&'a str> {
            metadata
                .titles
                .iter()
                .filter(|t| match t.title_type.as_deref() {
                    None => !subtitles,
                    Some("Subtitle") => subtitles,
                    Some(_) => false,
                })
                .map(|t| t.title.as_str())
                .collect()
        };
        let agents = |agents: Vec<&'a Agent>| -> Vec<WorkAgent<'a>> {
            agents
                .into_iter()
                .enumerate()
                .map(|(index, agent)| WorkAgent::new(agent, index))
                .collect()
        };
        let editors: Vec<&'a Agent> = metadata
            .contributors
            .iter()
            .filter(|c| c.contributor_type.as_deref() == Some("Editor"))
            .collect();

        Self {
            doi: metadata.doi.clone().or_else(|| metadata.doi_name()),
            work_type: work_type(metadata),
            url: metadata.url.as_deref().or(metadata.identifier.as_deref()),
            title: titles_of(false),
            subtitle: titles_of(true),
            author: agents(metadata.creators.iter().collect()),
            editor: agents(editors),
            abstract_text: metadata
                .abstract_text()
                .map(|text| format!("<jats:p>{text}</jats:p>")),
            container_title: periodical.and_then(|p| p.title.as_deref()).into_iter().collect(),
            issn: periodical.and_then(|p| p.issn.as_deref()).into_iter().collect(),
            volume: periodical.and_then(|p| p.volume.as_deref()),
            issue: periodical.and_then(|p| p.issue.as_deref()),
            page: periodical.and_then(Container::pages),
            publisher: metadata.publisher.as_deref(),
            issued: metadata
                .date_of(DateType::Issued)
                .or_else(|| metadata.year())
                .map(CslDate::new),
            created: metadata.date_of(DateType::Created).map(CslDate::new),
            deposited: metadata.date_of(DateType::Updated).map(CslDate::new),
            reference: metadata
                .related_identifiers
                .iter()
                .filter(|r| r.relation_type == "References" && r.related_identifier_type == "DOI")
                .filter_map(|r| validate_doi(&r.related_identifier))
                .enumerate()
                .map(|(index, doi)| WorkReference {
                    key: format!("ref{}", index + 1),
                    doi,
                })
                .collect(),
            funder: metadata
                .funding_references
                .iter()
                .map(|f| WorkFunder {
                    doi: f.funder_identifier.as_deref().and_then(validate_doi),
                    name: &f.funder_name,
                    award: f.award_number.as_deref().into_iter().collect(),
                })
                .collect(),
            license: metadata
                .rights_list
                .iter()
                .filter_map(|r| r.rights_uri.as_deref())
                .map(|url| WorkLicense { url })
                .collect(),
            language: metadata.language.as_deref(),
            subject: metadata.subjects.iter().map(|s| s.subject.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_fixture() {
        let metadata = CrossrefJsonFormat.parse(fixtures::CROSSREF_JSON).unwrap();
        assert_eq!(
            metadata.identifier.as_deref(),
            Some("https://doi.org/10.1371/journal.pone.0000030")
        );
        assert_eq!(metadata.doi.as_deref(), Some("10.1371/journal.pone.0000030"));
        assert_eq!(metadata.types.resource_type.as_deref(), Some("journal-article"));
        assert_eq!(metadata.types.ris.as_deref(), Some("JOUR"));
        assert!(metadata.title().unwrap().starts_with("Triose Phosphate Isomerase"));

        assert_eq!(metadata.creators.len(), 3);
        assert_eq!(metadata.creators[0].name, "Markus Ralser");
        assert_eq!(
            metadata.creators[1].identifier.as_deref(),
            Some("https://orcid.org/0000-0002-1825-0097")
        );
        assert_eq!(metadata.creators[2].name, "TPI Study Group");
        assert_eq!(metadata.creators[2].kind, None);

        let periodical = metadata.periodical.as_ref().unwrap();
        assert_eq!(periodical.container_type.as_deref(), Some("Journal"));
        assert_eq!(periodical.title.as_deref(), Some("PLoS ONE"));
        assert_eq!(periodical.issn.as_deref(), Some("1932-6203"));
        assert_eq!(periodical.first_page.as_deref(), Some("e30"));

        assert_eq!(metadata.date_of(DateType::Issued), Some("2006-12-20"));
        assert_eq!(metadata.date_of(DateType::Created), Some("2006-12-21"));
        assert_eq!(metadata.related_identifiers.len(), 1);
        assert_eq!(
            metadata.related_identifiers[0].related_identifier,
            "10.1056/nejm199105163242002"
        );

        let funding = &metadata.funding_references[0];
        assert_eq!(funding.funder_name, "Deutsche Forschungsgemeinschaft");
        assert_eq!(
            funding.funder_identifier.as_deref(),
            Some("https://doi.org/10.13039/501100001659")
        );
        assert_eq!(funding.award_number.as_deref(), Some("SFB 618"));
        assert_eq!(
            metadata.rights_list[0].rights_uri.as_deref(),
            Some("http://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(metadata.subjects.len(), 1);
    }

    #[test]
    fn test_bare_message_and_markup() {
        let metadata = CrossrefJsonFormat
            .parse(r#"{"DOI": "10.5555/12345678", "abstract": "<jats:p>Plain <jats:italic>text</jats:italic></jats:p>"}"#)
            .unwrap();
        assert_eq!(metadata.doi.as_deref(), Some("10.5555/12345678"));
        assert_eq!(metadata.abstract_text(), Some("Plain text"));
        assert_eq!(metadata.types.resource_type, None);
    }

    #[test]
    fn test_funder_without_award() {
        let metadata = CrossrefJsonFormat
            .parse(r#"{"message-type": "work", "message": {"funder": [{"name": "NSF"}, {"award": ["1"]}]}}"#)
            .unwrap();
        assert_eq!(metadata.funding_references.len(), 1);
        assert_eq!(metadata.funding_references[0].award_number, None);
    }

    #[test]
    fn test_round_trip() {
        let metadata = CrossrefJsonFormat.parse(fixtures::CROSSREF_JSON).unwrap();
        let output = CrossrefJsonFormat.serialize(&metadata).unwrap();
        assert!(output.starts_with("{\n  \"status\": \"ok\",\n  \"message-type\": \"work\""));
        assert!(CrossrefJsonFormat.recognizes(&Sniff::new(&output)));

        let reread = CrossrefJsonFormat.parse(&output).unwrap();
        assert_eq!(reread.identifier, metadata.identifier);
        assert_eq!(reread.url, metadata.url);
        assert_eq!(reread.types, metadata.types);
        assert_eq!(reread.titles, metadata.titles);
        assert_eq!(reread.creators, metadata.creators);
        assert_eq!(reread.periodical, metadata.periodical);
        assert_eq!(reread.dates, metadata.dates);
        assert_eq!(reread.related_identifiers, metadata.related_identifiers);
        assert_eq!(reread.funding_references, metadata.funding_references);
        assert_eq!(reread.rights_list, metadata.rights_list);
        assert_eq!(reread.subjects, metadata.subjects);
    }

    #[test]
    fn test_recognizes() {
        assert!(CrossrefJsonFormat.recognizes(&Sniff::new(fixtures::CROSSREF_JSON)));
        assert!(!CrossrefJsonFormat.recognizes(&Sniff::new(fixtures::DATACITE_JSON)));
        assert!(!CrossrefJsonFormat.recognizes(&Sniff::new(r#"{"message-type": "work-list"}"#)));
    }
}
