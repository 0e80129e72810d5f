//! Crossref XML reader and writer.
//!
//! Reads deposit batches (`doi_batch`) as well as query results
//! (`doi_records`, `crossref_result`); writes deposit batches.

use super::{container_type, funder, strip_markup, work_type, work_types};
use crate::error::{ParseError, ValueError, WriteError};
use crate::identifier::{doi_from_url, normalize_doi, normalize_orcid, validate_doi};
use crate::metadata::{
    Agent, AgentKind, Container, DateType, Description, Metadata, RelatedIdentifier, Rights, Title,
};
use crate::utils::{date_from_parts, date_parts};
use crate::xml::{XmlNode, XmlWriter, parse_document};
use crate::{Format, MetadataFormat, Sniff};

const CROSSREF_NAMESPACE: &str = "http://www.crossref.org/schema/4.4.2";
const CROSSREF_ROOTS: [&str; 4] = ["doi_records", "crossref_result", "doi_batch", "crossref"];

/// Work elements and the Crossref type each one stands for.
const WORK_ELEMENTS: [(&str, &str); 8] = [
    ("journal_article", "journal-article"),
    ("posted_content", "posted-content"),
    ("conference_paper", "proceedings-article"),
    ("content_item", "book-chapter"),
    ("dataset", "dataset"),
    ("dissertation", "dissertation"),
    ("report-paper_metadata", "report"),
    ("book_metadata", "book"),
];

/// Crossref deposit or query XML, `.xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossrefXmlFormat;

impl MetadataFormat for CrossrefXmlFormat {
    fn format(&self) -> Format {
        Format::CrossrefXml
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.xml_root().is_some_and(|root| CROSSREF_ROOTS.contains(&root))
            || sniff
                .xml_namespaces()
                .iter()
                .any(|ns| ns.contains("crossref.org"))
    }

    /// # Errors
    ///
    /// Returns `MissingValue` when the document holds no work element.
    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let root = parse_document(content, Format::CrossrefXml)?;
        let (work, crossref_type) = WORK_ELEMENTS
            .iter()
            .find_map(|(element, kind)| root.descendant(element).map(|work| (work, *kind)))
            .ok_or_else(|| {
                ParseError::without_position(
                    Format::CrossrefXml,
                    ValueError::MissingValue {
                        field: "work",
                        key: "journal_article",
                    },
                )
            })?;

        let mut metadata = read_work(work, crossref_type);
        metadata.periodical = container(&root, work, crossref_type);
        metadata.language = root
            .descendant("journal_metadata")
            .and_then(|j| j.attr("language"))
            .or_else(|| work.attr("language"))
            .map(String::from);
        if metadata.publisher.is_none() {
            metadata.publisher = root.descendant("publisher_name").and_then(XmlNode::text);
        }
        metadata.schema_version = root
            .attr("xmlns")
            .filter(|ns| ns.contains("crossref.org"))
            .map(String::from);
        Ok(metadata)
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        write_batch(metadata)
    }
}

fn read_work(work: &XmlNode, crossref_type: &str) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.types = work_types(crossref_type);

    if let Some(doi) = work.path(&["doi_data", "doi"]).and_then(XmlNode::text) {
        metadata.identifier = normalize_doi(&doi);
        metadata.doi = doi_from_url(&doi);
    }
    metadata.url = work.path(&["doi_data", "resource"]).and_then(XmlNode::text);

    if let Some(titles) = work.child("titles") {
        metadata.titles = titles
            .children
            .iter()
            .filter_map(|title| {
                let title_type = match title.name.as_str() {
                    "title" => None,
                    "subtitle" => Some("Subtitle"),
                    "original_language_title" => Some("TranslatedTitle"),
                    _ => return None,
                };
                Some(Title {
                    title: title.deep_text()?,
                    title_type: title_type.map(String::from),
                })
            })
            .collect();
    }

    for contributor in work.child("contributors").into_iter().flat_map(|c| &c.children) {
        let Some(mut agent) = agent(contributor) else {
            continue;
        };
        match contributor.attr("contributor_role").unwrap_or("author") {
            "author" => metadata.creators.push(agent),
            "editor" => {
                agent.contributor_type = Some("Editor".to_string());
                metadata.contributors.push(agent);
            }
            _ => {
                agent.contributor_type = Some("Other".to_string());
                metadata.contributors.push(agent);
            }
        }
    }

    if let Some(abstract_text) = work.child("abstract").and_then(XmlNode::deep_text) {
        metadata.descriptions.push(Description {
            description: abstract_text,
            description_type: Some("Abstract".to_string()),
        });
    }

    let published = work
        .child("publication_date")
        .or_else(|| work.child("posted_date"))
        .or_else(|| work.descendant("publication_date"));
    metadata.push_date(published.and_then(read_date), DateType::Issued);
    metadata.push_date(
        work.child("posted_date")
            .filter(|_| work.child("publication_date").is_some())
            .and_then(read_date),
        DateType::Available,
    );

    metadata.related_identifiers = work
        .child("citation_list")
        .into_iter()
        .flat_map(|list| list.children_named("citation"))
        .filter_map(|citation| citation.child_text("doi"))
        .filter_map(|doi| RelatedIdentifier::from_id(&doi, "References"))
        .collect();

    metadata.funding_references = work
        .descendants("assertion")
        .into_iter()
        .filter(|a| a.attr("name") == Some("fundgroup"))
        .filter_map(|group| {
            let assertion = |name: &str| {
                group
                    .descendants("assertion")
                    .into_iter()
                    .find(|a| a.attr("name") == Some(name))
            };
            let funder_name = assertion("funder_name")?.text()?;
            let funder_doi = assertion("funder_identifier").and_then(XmlNode::text);
            let award_number = assertion("award_number").and_then(XmlNode::text);
            Some(funder(funder_name, funder_doi.as_deref(), award_number))
        })
        .collect();

    let mut licenses: Vec<String> = work
        .descendants("license_ref")
        .into_iter()
        .filter_map(XmlNode::text)
        .collect();
    licenses.dedup();
    metadata.rights_list = licenses
        .into_iter()
        .map(|uri| Rights {
            rights: None,
            rights_uri: Some(uri),
        })
        .collect();

    metadata.publisher = work.descendant("publisher_name").and_then(XmlNode::text);
    metadata
}

fn agent(node: &XmlNode) -> Option<Agent> {
    let mut agent = match node.name.as_str() {
        "person_name" => {
            let given = node.child_text("given_name");
            let family = node.child_text("surname");
            if given.is_none() && family.is_none() {
                return None;
            }
            Agent::person(given, family)
        }
        "organization" => Agent::organization(node.text()?),
        _ => return None,
    };
    agent.identifier = node
        .child_text("ORCID")
        .as_deref()
        .and_then(normalize_orcid);
    Some(agent)
}

/// ISO date from `<year>`, `<month>` and `<day>` children.
fn read_date(node: &XmlNode) -> Option<String> {
    let parts: Vec<i64> = ["year", "month", "day"]
        .iter()
        .map_while(|name| node.child_text(name)?.parse().ok())
        .collect();
    date_from_parts(&parts)
}

fn container(root: &XmlNode, work: &XmlNode, crossref_type: &str) -> Option<Container> {
    let mut periodical = Container::default();
    match crossref_type {
        "journal-article" => {
            if let Some(journal) = root.descendant("journal_metadata") {
                periodical.title = journal.child_text("full_title");
                periodical.issn = journal.child_text("issn");
            }
            if let Some(issue) = root.descendant("journal_issue") {
                periodical.volume = issue.path(&["journal_volume", "volume"]).and_then(XmlNode::text);
                periodical.issue = issue.child_text("issue");
            }
        }
        "book-chapter" => {
            periodical.title = root
                .descendant("book_metadata")
                .or_else(|| root.descendant("book_series_metadata"))
                .and_then(|book| book.path(&["titles", "title"]))
                .and_then(XmlNode::text);
        }
        "proceedings-article" => {
            periodical.title = root
                .descendant("proceedings_metadata")
                .and_then(|p| p.child_text("proceedings_title"));
        }
        _ => {}
    }
    if let Some(pages) = work.child("pages") {
        periodical.first_page = pages.child_text("first_page");
        periodical.last_page = pages.child_text("last_page");
    }
    if periodical.title.is_some() {
        periodical.container_type = Some(container_type(crossref_type).to_string());
    }
    periodical.non_empty()
}

fn write_batch(metadata: &Metadata) -> Result<String, WriteError> {
    let mut w = XmlWriter::new(Format::CrossrefXml)?;
    let schema_location = format!(
        "{CROSSREF_NAMESPACE} https://www.crossref.org/schemas/crossref4.4.2.xsd"
    );
    w.start(
        "doi_batch",
        &[
            ("xmlns", CROSSREF_NAMESPACE),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xsi:schemaLocation", schema_location.as_str()),
            ("version", "4.4.2"),
        ],
    )?;
    w.start("body", &[])?;

    let periodical = metadata.periodical.as_ref();
    match work_type(metadata) {
        "journal-article" => {
            w.start("journal", &[])?;
            let language: Vec<(&str, &str)> = metadata
                .language
                .as_deref()
                .map(|l| ("language", l))
                .into_iter()
                .collect();
            w.start("journal_metadata", &language)?;
            w.optional("full_title", periodical.and_then(|p| p.title.as_deref()))?;
            w.optional("issn", periodical.and_then(|p| p.issn.as_deref()))?;
            w.end("journal_metadata")?;

            let volume = periodical.and_then(|p| p.volume.as_deref());
            let issue = periodical.and_then(|p| p.issue.as_deref());
            if volume.is_some() || issue.is_some() {
                w.start("journal_issue", &[])?;
                if let Some(volume) = volume {
                    w.start("journal_volume", &[])?;
                    w.element("volume", &[], volume)?;
                    w.end("journal_volume")?;
                }
                w.optional("issue", issue)?;
                w.end("journal_issue")?;
            }

            w.start("journal_article", &[("publication_type", "full_text")])?;
            write_titles(&mut w, metadata)?;
            write_contributors(&mut w, metadata)?;
            write_work_body(&mut w, metadata, "publication_date")?;
            w.end("journal_article")?;
            w.end("journal")?;
        }
        "dataset" => {
            w.start("database", &[])?;
            w.start("database_metadata", &[])?;
            w.start("titles", &[])?;
            w.element(
                "title",
                &[],
                periodical
                    .and_then(|p| p.title.as_deref())
                    .or(metadata.publisher.as_deref())
                    .unwrap_or("Datasets"),
            )?;
            w.end("titles")?;
            w.end("database_metadata")?;
            w.start("dataset", &[("dataset_type", "record")])?;
            write_contributors(&mut w, metadata)?;
            write_titles(&mut w, metadata)?;
            w.start("database_date", &[])?;
            write_date(&mut w, "publication_date", metadata)?;
            w.end("database_date")?;
            write_work_body(&mut w, metadata, "")?;
            w.end("dataset")?;
            w.end("database")?;
        }
        _ => {
            w.start("posted_content", &[("type", "other")])?;
            write_contributors(&mut w, metadata)?;
            write_titles(&mut w, metadata)?;
            write_work_body(&mut w, metadata, "posted_date")?;
            w.end("posted_content")?;
        }
    }

    w.end("body")?;
    w.end("doi_batch")?;
    w.finish()
}

fn write_titles(w: &mut XmlWriter, metadata: &Metadata) -> Result<(), WriteError> {
    if metadata.titles.is_empty() {
        return Ok(());
    }
    w.start("titles", &[])?;
    for title in &metadata.titles {
        match title.title_type.as_deref() {
            None => w.element("title", &[], &title.title)?,
            Some("Subtitle") => w.element("subtitle", &[], &title.title)?,
            Some(_) => {}
        }
    }
    w.end("titles")
}

fn write_contributors(w: &mut XmlWriter, metadata: &Metadata) -> Result<(), WriteError> {
    let editors = metadata
        .contributors
        .iter()
        .filter(|c| c.contributor_type.as_deref() == Some("Editor"));
    let people: Vec<(&Agent, &str)> = metadata
        .creators
        .iter()
        .map(|a| (a, "author"))
        .chain(editors.map(|a| (a, "editor")))
        .collect();
    if people.is_empty() {
        return Ok(());
    }

    w.start("contributors", &[])?;
    let mut seen_roles: Vec<&str> = Vec::new();
    for (agent, role) in people {
        let sequence = if seen_roles.contains(&role) {
            "additional"
        } else {
            seen_roles.push(role);
            "first"
        };
        let attrs = [("contributor_role", role), ("sequence", sequence)];
        let structured = agent.kind != Some(AgentKind::Organization) && agent.family_name.is_some();
        if structured {
            w.start("person_name", &attrs)?;
            w.optional("given_name", agent.given_name.as_deref())?;
            w.optional("surname", agent.family_name.as_deref())?;
            if let Some(orcid) = agent.identifier.as_deref().and_then(normalize_orcid) {
                w.element("ORCID", &[], &orcid)?;
            }
            w.end("person_name")?;
        } else {
            w.element("organization", &attrs, &agent.name)?;
        }
    }
    w.end("contributors")
}

fn write_date(w: &mut XmlWriter, element: &str, metadata: &Metadata) -> Result<(), WriteError> {
    let parts = metadata
        .date_of(DateType::Issued)
        .or_else(|| metadata.year())
        .map(date_parts)
        .unwrap_or_default();
    let [year, rest @ ..] = parts.as_slice() else {
        return Ok(());
    };
    w.start(element, &[("media_type", "online")])?;
    if let Some(month) = rest.first() {
        w.element("month", &[], &format!("{month:02}"))?;
    }
    if let Some(day) = rest.get(1) {
        w.element("day", &[], &format!("{day:02}"))?;
    }
    w.element("year", &[], &year.to_string())?;
    w.end(element)
}

/// Abstract, date, pages, funding, licenses, DOI data and citations.
fn write_work_body(w: &mut XmlWriter, metadata: &Metadata, date_element: &str) -> Result<(), WriteError> {
    if date_element == "posted_date" {
        write_date(w, date_element, metadata)?;
    }
    if let Some(abstract_text) = metadata.abstract_text() {
        w.start(
            "jats:abstract",
            &[("xmlns:jats", "http://www.ncbi.nlm.nih.gov/JATS1")],
        )?;
        w.element("jats:p", &[], abstract_text)?;
        w.end("jats:abstract")?;
    }
    if date_element == "publication_date" {
        write_date(w, date_element, metadata)?;
    }

    if let Some(periodical) = metadata.periodical.as_ref() {
        if periodical.first_page.is_some() || periodical.last_page.is_some() {
            w.start("pages", &[])?;
            w.optional("first_page", periodical.first_page.as_deref())?;
            w.optional("last_page", periodical.last_page.as_deref())?;
            w.end("pages")?;
        }
    }

    if !metadata.funding_references.is_empty() {
        w.start(
            "fr:program",
            &[
                ("xmlns:fr", "http://www.crossref.org/fundref.xsd"),
                ("name", "fundref"),
            ],
        )?;
        for funding in &metadata.funding_references {
            w.start("fr:assertion", &[("name", "fundgroup")])?;
            w.element("fr:assertion", &[("name", "funder_name")], &funding.funder_name)?;
            if let Some(identifier) = funding.funder_identifier.as_deref() {
                w.element("fr:assertion", &[("name", "funder_identifier")], identifier)?;
            }
            if let Some(award) = funding.award_number.as_deref() {
                w.element("fr:assertion", &[("name", "award_number")], award)?;
            }
            w.end("fr:assertion")?;
        }
        w.end("fr:program")?;
    }

    let licenses: Vec<&str> = metadata
        .rights_list
        .iter()
        .filter_map(|r| r.rights_uri.as_deref())
        .collect();
    if !licenses.is_empty() {
        w.start(
            "ai:program",
            &[
                ("xmlns:ai", "http://www.crossref.org/AccessIndicators.xsd"),
                ("name", "AccessIndicators"),
            ],
        )?;
        for uri in licenses {
            w.element("ai:license_ref", &[("applies_to", "vor")], uri)?;
        }
        w.end("ai:program")?;
    }

    let doi = metadata.doi.clone().or_else(|| metadata.doi_name());
    if let Some(doi) = doi {
        w.start("doi_data", &[])?;
        w.element("doi", &[], &doi)?;
        w.optional(
            "resource",
            metadata.url.as_deref().or(metadata.identifier.as_deref()),
        )?;
        w.end("doi_data")?;
    }

    let citations: Vec<String> = metadata
        .related_identifiers
        .iter()
        .filter(|r| r.relation_type == "References" && r.related_identifier_type == "DOI")
        .filter_map(|r| validate_doi(&r.related_identifier))
        .collect();
    if !citations.is_empty() {
        w.start("citation_list", &[])?;
        for (index, doi) in citations.iter().enumerate() {
            let key = format!("ref{}", index + 1);
            w.start("citation", &[("key", key.as_str())])?;
            w.element("doi", &[], doi)?;
            w.end("citation")?;
        }
        w.end("citation_list")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_markup_keeps_word_order() {
        let input = fixtures::CROSSREF_XML
            .replace(
                "<title>Automated quantitative histology reveals vascular morphodynamics during Arabidopsis hypocotyl secondary growth</title>",
                "<title>Secondary growth in <i>Arabidopsis</i> hypocotyls</title>",
            )
            .replace(
                "<jats:p>Among various advantages, their small size makes model organisms preferred subjects of investigation.</jats:p>",
                "<jats:p>Small <jats:italic>model</jats:italic> organisms, e.g. <jats:italic>A. thaliana</jats:italic>, are preferred.</jats:p>",
            );
        let metadata = CrossrefXmlFormat.parse(&input).unwrap();
        assert_eq!(
            metadata.title(),
            Some("Secondary growth in Arabidopsis hypocotyls")
        );
        assert_eq!(
            metadata.descriptions[0].description,
            "Small model organisms, e.g. A. thaliana, are preferred."
        );
    }

    #[test]
    fn test_parse_fixture() {
        let metadata = CrossrefXmlFormat.parse(fixtures::CROSSREF_XML).unwrap();
        assert_eq!(
            metadata.identifier.as_deref(),
            Some("https://doi.org/10.7554/elife.01567")
        );
        assert_eq!(metadata.doi.as_deref(), Some("10.7554/eLife.01567"));
        assert_eq!(
            metadata.url.as_deref(),
            Some("http://elifesciences.org/lookup/doi/10.7554/eLife.01567")
        );
        assert_eq!(metadata.types.resource_type.as_deref(), Some("journal-article"));
        assert_eq!(metadata.types.bibtex.as_deref(), Some("article"));
        assert!(metadata.title().unwrap().starts_with("Automated quantitative histology"));

        assert_eq!(metadata.creators.len(), 2);
        assert_eq!(metadata.creators[0].name, "Martial Sankar");
        assert_eq!(
            metadata.creators[1].identifier.as_deref(),
            Some("https://orcid.org/0000-0002-6240-5434")
        );
        assert_eq!(metadata.contributors[0].family_name.as_deref(), Some("Weigel"));
        assert_eq!(metadata.contributors[0].contributor_type.as_deref(), Some("Editor"));

        assert!(metadata.abstract_text().unwrap().starts_with("Among various advantages"));
        assert_eq!(metadata.date_of(DateType::Issued), Some("2014-02-11"));
        assert_eq!(metadata.language.as_deref(), Some("en"));

        let periodical = metadata.periodical.as_ref().unwrap();
        assert_eq!(periodical.container_type.as_deref(), Some("Journal"));
        assert_eq!(periodical.title.as_deref(), Some("eLife"));
        assert_eq!(periodical.issn.as_deref(), Some("2050-084X"));
        assert_eq!(periodical.volume.as_deref(), Some("3"));
        assert_eq!(periodical.first_page.as_deref(), Some("e01567"));

        assert_eq!(metadata.related_identifiers.len(), 2);
        assert_eq!(metadata.related_identifiers[0].related_identifier, "10.1038/ncb2764");

        let funding = &metadata.funding_references[0];
        assert_eq!(funding.funder_name, "SystemsX");
        assert_eq!(
            funding.funder_identifier.as_deref(),
            Some("https://doi.org/10.13039/501100006390")
        );
        assert_eq!(funding.award_number.as_deref(), Some("SXPHI0_142001"));
        assert_eq!(
            metadata.rights_list[0].rights_uri.as_deref(),
            Some("http://creativecommons.org/licenses/by/3.0/")
        );
    }

    #[test]
    fn test_no_work_element() {
        let error = CrossrefXmlFormat
            .parse("<doi_records><doi_record/></doi_records>")
            .unwrap_err();
        assert!(matches!(error.error, ValueError::MissingValue { field: "work", .. }));
    }

    #[test]
    fn test_round_trip() {
        let metadata = CrossrefXmlFormat.parse(fixtures::CROSSREF_XML).unwrap();
        let output = CrossrefXmlFormat.serialize(&metadata).unwrap();
        assert!(output.contains(r#"<doi_batch xmlns="http://www.crossref.org/schema/4.4.2""#));
        assert!(CrossrefXmlFormat.recognizes(&Sniff::new(&output)));

        let reread = CrossrefXmlFormat.parse(&output).unwrap();
        assert_eq!(reread.identifier, metadata.identifier);
        assert_eq!(reread.url, metadata.url);
        assert_eq!(reread.types, metadata.types);
        assert_eq!(reread.titles, metadata.titles);
        assert_eq!(reread.creators, metadata.creators);
        assert_eq!(reread.contributors, metadata.contributors);
        assert_eq!(reread.descriptions, metadata.descriptions);
        assert_eq!(reread.dates, metadata.dates);
        assert_eq!(reread.periodical, metadata.periodical);
        assert_eq!(reread.related_identifiers, metadata.related_identifiers);
        assert_eq!(reread.funding_references, metadata.funding_references);
        assert_eq!(reread.rights_list, metadata.rights_list);
        assert_eq!(reread.language, metadata.language);
    }

    #[test]
    fn test_non_journal_work_is_posted_content() {
        let mut metadata = Metadata::new();
        metadata.types = work_types("posted-content");
        metadata.identifier = Some("https://doi.org/10.1101/097196".to_string());
        metadata.titles = vec![Title::new("A Preprint")];
        metadata.creators = vec![Agent::organization("The GTEx Consortium")];
        metadata.push_date(Some("2017-01-04".to_string()), DateType::Issued);

        let output = CrossrefXmlFormat.serialize(&metadata).unwrap();
        assert!(output.contains(r#"<posted_content type="other">"#));
        assert!(output.contains(
            r#"<organization contributor_role="author" sequence="first">The GTEx Consortium</organization>"#
        ));

        let reread = CrossrefXmlFormat.parse(&output).unwrap();
        assert_eq!(reread.doi.as_deref(), Some("10.1101/097196"));
        assert_eq!(reread.types.resource_type.as_deref(), Some("posted-content"));
        assert_eq!(reread.creators, metadata.creators);
        assert_eq!(reread.date_of(DateType::Issued), Some("2017-01-04"));
    }

    #[test]
    fn test_recognizes() {
        assert!(CrossrefXmlFormat.recognizes(&Sniff::new(fixtures::CROSSREF_XML)));
        assert!(!CrossrefXmlFormat.recognizes(&Sniff::new(fixtures::DATACITE_XML)));
    }
}
