//! Interpretation of scanned BibTeX entries.

use crate::crosswalk::Vocabulary;
use crate::identifier::{doi_from_url, normalize_doi, normalize_url};
use crate::metadata::{
    Agent, Container, DateType, Description, Metadata, Rights, Subject, Title, Types,
};
use crate::utils::{agent_from_name, non_blank, split_keywords};
use itertools::Itertools;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// One `@type{key, ...}` entry with raw field values.
///
/// Field names are lower-cased; values keep their inner braces until read
/// through [`RawBibtexEntry::get`].
#[derive(Debug, Clone, Default)]
pub(crate) struct RawBibtexEntry {
    pub(crate) entry_type: String,
    pub(crate) key: String,
    fields: Vec<(String, String)>,
}

impl RawBibtexEntry {
    pub(crate) fn new(entry_type: String, key: String) -> Self {
        Self {
            entry_type,
            key,
            fields: Vec::new(),
        }
    }

    pub(crate) fn add_field(&mut self, name: String, value: String) {
        self.fields.push((name, value));
    }

    /// Value as written, braces included.
    pub(crate) fn raw(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value with TeX grouping and escapes removed, `None` when blank.
    pub(crate) fn get(&self, name: &str) -> Option<String> {
        self.raw(name).map(clean_tex).and_then(|v| non_blank(&v))
    }

    fn agents(&self, name: &str) -> Vec<Agent> {
        self.raw(name)
            .map(|names| {
                split_names(names)
                    .into_iter()
                    .filter(|n| !n.eq_ignore_ascii_case("others"))
                    .map(|n| agent_from_bibtex_name(&n))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Issued date from `date`, or from `year` and `month`.
    fn issued(&self) -> Option<String> {
        if let Some(date) = self.get("date") {
            return Some(date);
        }
        let year = self.get("year")?;
        match self.get("month").as_deref().and_then(month_number) {
            Some(month) => Some(format!("{year}-{month:02}")),
            None => Some(year),
        }
    }
}

impl From<RawBibtexEntry> for Metadata {
    fn from(entry: RawBibtexEntry) -> Self {
        let mut metadata = Metadata::new();

        metadata.types = Types::from_source(Vocabulary::Bibliography, &entry.entry_type);

        let doi = entry.get("doi");
        metadata.identifier = doi
            .as_deref()
            .and_then(normalize_doi)
            .or_else(|| normalize_doi(&entry.key))
            .or_else(|| entry.get("url").as_deref().and_then(normalize_url));
        metadata.doi = doi.as_deref().and_then(doi_from_url);
        metadata.url = entry.get("url");

        metadata.creators = entry.agents("author");
        metadata.contributors = entry
            .agents("editor")
            .into_iter()
            .map(|agent| Agent {
                contributor_type: Some("Editor".to_string()),
                ..agent
            })
            .collect();

        if let Some(title) = entry.get("title") {
            metadata.titles.push(Title::new(title));
        }
        if let Some(abstract_text) = entry.get("abstract") {
            metadata.descriptions.push(Description {
                description: abstract_text,
                description_type: Some("Abstract".to_string()),
            });
        }
        metadata.subjects = entry
            .get("keywords")
            .map(|k| split_keywords(&k).into_iter().map(Subject::new).collect())
            .unwrap_or_default();

        metadata.push_date(entry.issued(), DateType::Issued);
        metadata.publication_year = entry
            .get("year")
            .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()));
        metadata.publisher = entry.get("publisher");

        let (container_type, container_title) = match entry.get("journal") {
            Some(journal) => (Some("Journal"), Some(journal)),
            None => (
                entry.get("booktitle").map(|_| "Book"),
                entry.get("booktitle"),
            ),
        };
        let mut periodical = Container {
            container_type: container_title.as_ref().and(container_type.map(String::from)),
            title: container_title,
            issn: entry.get("issn"),
            volume: entry.get("volume"),
            issue: entry.get("number"),
            ..Container::default()
        };
        if let Some(pages) = entry.get("pages") {
            periodical.set_pages(&pages);
        }
        metadata.periodical = periodical.non_empty();

        if let Some(copyright) = entry.get("copyright") {
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
        metadata.language = entry.get("language");
        metadata.version = entry.get("version");

        metadata
    }
}

const TEXTBACKSLASH: &str = "textbackslash";

/// Removes TeX grouping braces and simple escapes, collapsing whitespace.
pub(crate) fn clean_tex(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' | '}' => (),
            '\\' if chars.clone().take(TEXTBACKSLASH.len()).eq(TEXTBACKSLASH.chars()) => {
                cleaned.push('\\');
                chars.by_ref().take(TEXTBACKSLASH.len()).for_each(drop);
            }
            '\\' => match chars.peek() {
                Some(&next) if "&%$#_{}".contains(next) => {
                    cleaned.push(next);
                    chars.next();
                }
                _ => cleaned.push(c),
            },
            _ => cleaned.push(c),
        }
    }
    cleaned.split_whitespace().join(" ")
}

/// Splits a name list on " and " outside braces.
fn split_names(names: &str) -> Vec<String> {
    let names = names.split_whitespace().join(" ");
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut index = 0;
    while index < names.len() {
        let rest = &names[index..];
        match rest.chars().next() {
            Some('{') => depth += 1,
            Some('}') => depth = depth.saturating_sub(1),
            _ => (),
        }
        if depth == 0
            && rest.len() >= 5
            && rest.is_char_boundary(5)
            && rest[..5].eq_ignore_ascii_case(" and ")
        {
            parts.push(names[start..index].to_string());
            index += 5;
            start = index;
            continue;
        }
        index += rest.chars().next().map_or(1, char::len_utf8);
    }
    parts.push(names[start..].to_string());
    parts.into_iter().filter_map(|n| non_blank(&n)).collect()
}

/// A fully braced name is a corporate author and is never split.
fn agent_from_bibtex_name(name: &str) -> Agent {
    let trimmed = name.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') && !trimmed[1..].contains('{') {
        return Agent::organization(clean_tex(trimmed));
    }
    agent_from_name(&clean_tex(trimmed))
}

/// Month number from a month macro, name, or number.
fn month_number(month: &str) -> Option<u32> {
    let month = month.trim().to_ascii_lowercase();
    if let Ok(number) = month.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    let prefix = month.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .and_then(|index| u32::try_from(index + 1).ok())
}
