//! BibTeX rendering.

use crate::crosswalk::Vocabulary;
use crate::metadata::{Agent, AgentKind, Metadata};
use itertools::Itertools;
use std::fmt::Write;

/// Renders one `@type{key, ...}` entry.
///
/// The citation key is the record identifier. Fields are written in a fixed
/// order and omitted when empty.
pub(crate) fn bibtex_write(metadata: &Metadata) -> String {
    let entry_type = metadata.type_in(Vocabulary::Bibliography);
    let key = metadata
        .identifier
        .as_deref()
        .or(metadata.url.as_deref())
        .unwrap_or("unknown");

    let periodical = metadata.periodical.as_ref();
    let container_field = match entry_type {
        "inproceedings" | "incollection" | "inbook" => "booktitle",
        _ => "journal",
    };
    let month = metadata
        .date_of(crate::metadata::DateType::Issued)
        .and_then(|date| date.get(5..7));

    let fields: Vec<(&str, Option<String>)> = vec![
        ("doi", metadata.doi.clone().or_else(|| metadata.doi_name())),
        ("url", metadata.url.clone()),
        ("author", names(&metadata.creators)),
        (
            "editor",
            names(
                &metadata
                    .contributors
                    .iter()
                    .filter(|c| c.contributor_type.as_deref() == Some("Editor"))
                    .cloned()
                    .collect::<Vec<_>>(),
            ),
        ),
        ("title", metadata.title().map(escape)),
        (
            container_field,
            periodical.and_then(|p| p.title.as_deref()).map(escape),
        ),
        ("issn", periodical.and_then(|p| p.issn.clone())),
        ("volume", periodical.and_then(|p| p.volume.clone())),
        ("number", periodical.and_then(|p| p.issue.clone())),
        ("pages", periodical.and_then(|p| p.pages()).map(|p| p.replace('-', "--"))),
        ("publisher", metadata.publisher.as_deref().map(escape)),
        ("year", metadata.year().map(String::from)),
        ("month", month.map(String::from)),
        ("abstract", metadata.abstract_text().map(escape)),
        (
            "keywords",
            (!metadata.subjects.is_empty())
                .then(|| escape(&metadata.subjects.iter().map(|s| s.subject.as_str()).join(", "))),
        ),
        ("language", metadata.language.clone()),
        ("version", metadata.version.clone()),
        (
            "copyright",
            metadata
                .rights_list
                .first()
                .and_then(|r| r.rights_uri.clone().or_else(|| r.rights.as_deref().map(escape))),
        ),
    ];

    let mut output = format!("@{entry_type}{{{key}");
    for (name, value) in fields {
        if let Some(value) = value {
            // writing into a String cannot fail
            let _ = write!(output, ",\n  {name} = {{{value}}}");
        }
    }
    output.push_str("\n}\n");
    output
}

/// Name list joined with " and "; organizations are braced so they stay whole.
fn names(agents: &[Agent]) -> Option<String> {
    if agents.is_empty() {
        return None;
    }
    Some(
        agents
            .iter()
            .map(|agent| match agent.kind {
                Some(AgentKind::Organization) => format!("{{{}}}", escape(&agent.name)),
                _ => escape(&agent.sort_name()),
            })
            .join(" and "),
    )
}

/// Escapes TeX specials and drops braces that would unbalance the entry.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' | '%' | '#' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\\' => escaped.push_str("\\textbackslash{}"),
            '{' | '}' => (),
            _ => escaped.push(c),
        }
    }
    escaped
}
