//! RIS format data structures.
//!
//! This module defines intermediate data structures used during RIS parsing.
//!
//! # Field Processing Strategy
//! - **Priority-based**: the container title follows the JF > T2 > JO priority
//! - **First-wins**: simple fields like title use the first valid value found
//! - **Two-pass**: DOI extraction checks the DO field first, then UR links
//! - **Precision-first**: DA is preferred over PY and Y1 for the issued date

use crate::Format;
use crate::crosswalk::Vocabulary;
use crate::error::{ParseError, ValueError};
use crate::identifier::{doi_from_url, normalize_doi, normalize_url};
use crate::metadata::{Agent, Container, DateType, Description, Metadata, Subject, Title, Types};
use crate::ris::tags::RisTag;
use crate::utils::parse_slash_date;
use std::collections::HashMap;
use tracing::debug;

/// Structured raw data from a RIS formatted file.
#[derive(Debug, Clone)]
pub(crate) struct RawRisData {
    /// Key-value pair data from the RIS file data.
    pub(crate) data: HashMap<RisTag, Vec<String>>,
    /// Creators of the work, in file order.
    pub(crate) authors: Vec<Agent>,
    /// Editors and other secondary names, with their role.
    pub(crate) contributors: Vec<Agent>,
    /// Invalid lines found in the RIS file data with line number context for error reporting.
    pub(crate) ignored_lines: Vec<(usize, String)>,
}

impl RawRisData {
    /// Create a new empty RawRisData.
    pub(crate) fn new() -> Self {
        Self {
            data: HashMap::new(),
            authors: Vec::new(),
            contributors: Vec::new(),
            ignored_lines: Vec::new(),
        }
    }

    /// Add a tag-value pair to the data.
    pub(crate) fn add_data(&mut self, tag: RisTag, value: String) {
        self.data.entry(tag).or_default().push(value);
    }

    pub(crate) fn add_author(&mut self, author: Agent) {
        self.authors.push(author);
    }

    pub(crate) fn add_contributor(&mut self, contributor: Agent) {
        self.contributors.push(contributor);
    }

    /// Add an ignored line with context.
    pub(crate) fn add_ignored_line(&mut self, line_number: usize, line: String) {
        self.ignored_lines.push((line_number, line));
    }

    /// Get the first value for a tag, if it exists.
    pub(crate) fn get_first(&self, tag: &RisTag) -> Option<&String> {
        self.data.get(tag).and_then(|values| values.first())
    }

    /// Remove and return all values for a tag.
    pub(crate) fn remove(&mut self, tag: &RisTag) -> Option<Vec<String>> {
        self.data.remove(tag)
    }

    /// Remove a tag, keeping its first value.
    fn take_first(&mut self, tag: &RisTag) -> Option<String> {
        self.remove(tag).and_then(|v| v.into_iter().next())
    }

    /// Check if the data contains any content (not just metadata).
    pub(crate) fn has_content(&self) -> bool {
        !self.data.is_empty() || !self.authors.is_empty() || !self.contributors.is_empty()
    }

    /// Get the best journal name based on tag priority.
    pub(crate) fn get_best_journal(&self) -> Option<String> {
        let mut best_journal = None;
        let mut best_priority = u8::MAX;

        for (tag, values) in &self.data {
            if let Some(priority) = tag.journal_priority() {
                if priority < best_priority && !values.is_empty() {
                    best_priority = priority;
                    best_journal = values.first().cloned();
                }
            }
        }

        best_journal
    }
}

impl TryFrom<RawRisData> for Metadata {
    type Error = ParseError;

    fn try_from(mut raw: RawRisData) -> Result<Self, Self::Error> {
        let reference_type = raw.take_first(&RisTag::Type).ok_or_else(|| {
            ParseError::without_position(
                Format::Ris,
                ValueError::MissingValue {
                    field: "reference type",
                    key: "TY",
                },
            )
        })?;

        let mut metadata = Metadata::new();
        metadata.types = Types::from_source(Vocabulary::CitationTag, &reference_type);

        if let Some(title) = raw
            .get_first(&RisTag::Title)
            .or_else(|| raw.get_first(&RisTag::TitleAlternative))
        {
            metadata.titles.push(Title::new(title.clone()));
        }
        raw.remove(&RisTag::Title);
        raw.remove(&RisTag::TitleAlternative);

        let journal = raw.get_best_journal();
        raw.remove(&RisTag::JournalFull);
        raw.remove(&RisTag::JournalFullAlternative);
        raw.remove(&RisTag::SecondaryTitle);

        let date = [RisTag::Date, RisTag::PublicationYear, RisTag::DatePrimary]
            .iter()
            .filter_map(|tag| raw.get_first(tag))
            .find_map(|date| parse_slash_date(date));
        metadata.push_date(date, DateType::Issued);
        raw.remove(&RisTag::Date);
        raw.remove(&RisTag::PublicationYear);
        raw.remove(&RisTag::DatePrimary);

        let mut periodical = Container {
            container_type: journal.as_ref().map(|_| "Journal".to_string()),
            title: journal,
            issn: raw.take_first(&RisTag::SerialNumber),
            volume: raw.take_first(&RisTag::Volume),
            issue: raw.take_first(&RisTag::Issue),
            ..Container::default()
        };
        let start_page = raw.take_first(&RisTag::StartPage);
        let end_page = raw.take_first(&RisTag::EndPage);
        match (start_page, end_page) {
            (Some(start), Some(end)) => periodical.set_pages(&format!("{start}-{end}")),
            (Some(start), None) => periodical.set_pages(&start),
            (None, Some(end)) => periodical.last_page = Some(end),
            (None, None) => (),
        }
        metadata.periodical = periodical.non_empty();

        // First pass: the dedicated DOI field
        let mut doi = raw.take_first(&RisTag::Doi).filter(|d| doi_from_url(d).is_some());
        let urls = raw.remove(&RisTag::Url).unwrap_or_default();
        // Second pass: a resolver link
        if doi.is_none() {
            doi = urls
                .iter()
                .find(|url| url.contains("doi.org") && doi_from_url(url).is_some())
                .cloned();
        }
        metadata.identifier = doi
            .as_deref()
            .and_then(normalize_doi)
            .or_else(|| urls.first().and_then(|url| normalize_url(url)));
        metadata.doi = doi.as_deref().and_then(doi_from_url);
        metadata.url = urls.into_iter().next();
        metadata.content_url = raw.remove(&RisTag::LinkPdf).unwrap_or_default();

        if let Some(abstract_text) = raw
            .get_first(&RisTag::Abstract)
            .or_else(|| raw.get_first(&RisTag::AbstractAlternative))
        {
            metadata.descriptions.push(Description {
                description: abstract_text.clone(),
                description_type: Some("Abstract".to_string()),
            });
        }
        raw.remove(&RisTag::Abstract);
        raw.remove(&RisTag::AbstractAlternative);

        metadata.subjects = raw
            .remove(&RisTag::Keywords)
            .unwrap_or_default()
            .into_iter()
            .map(Subject::new)
            .collect();
        metadata.publisher = raw.take_first(&RisTag::Publisher);
        metadata.language = raw.take_first(&RisTag::Language);
        metadata.version = raw.take_first(&RisTag::Edition);

        metadata.creators = raw.authors;
        metadata.contributors = raw.contributors;

        for tag in raw.data.keys() {
            debug!(tag = tag.as_tag(), "unmapped RIS tag");
        }

        Ok(metadata)
    }
}
