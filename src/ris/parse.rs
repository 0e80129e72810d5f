//! RIS format parsing implementation.
//!
//! This module handles the low-level parsing of RIS formatted text.

use crate::Format;
use crate::error::{ParseError, ValueError};
use crate::metadata::Agent;
use crate::ris::structure::RawRisData;
use crate::ris::tags::RisTag;
use crate::utils::agent_from_name;
use tracing::debug;

/// Parse the content of a RIS formatted file, returning structured data.
pub(crate) fn ris_parse<S: AsRef<str>>(ris_text: S) -> Vec<RawRisData> {
    let text = ris_text.as_ref();

    let mut records = Vec::new();
    let mut current = RawRisData::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim_start_matches('\u{feff}').trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        // Skip export headers
        if is_metadata_line(line) {
            continue;
        }

        match parse_ris_line(line, line_number) {
            Ok((tag, content)) => match tag {
                RisTag::Type => {
                    // Start of new record
                    if current.has_content() {
                        records.push(current);
                        current = RawRisData::new();
                    }
                    current.add_data(tag, content);
                }
                RisTag::EndOfReference => {
                    if current.has_content() {
                        records.push(current);
                        current = RawRisData::new();
                    }
                }
                _ if content.is_empty() => {}
                tag if tag.is_author_tag() => current.add_author(parse_author(&content)),
                tag => match tag.contributor_role() {
                    Some(role) => current.add_contributor(Agent {
                        contributor_type: Some(role.to_string()),
                        ..parse_author(&content)
                    }),
                    None => current.add_data(tag, content),
                },
            },
            Err(err) => {
                debug!(line = line_number, error = %err, "ignoring RIS line");
                current.add_ignored_line(line_number, line.to_string());
            }
        }
    }

    // Add the last record if it has content
    if current.has_content() {
        records.push(current);
    }

    records
}

/// Parse a single RIS line into a tag and content.
fn parse_ris_line(line: &str, line_number: usize) -> Result<(RisTag, String), ParseError> {
    let Some(tag_str) = line.get(..2) else {
        return Err(malformed(
            line_number,
            format!("Line too short for RIS format (minimum 2 chars): '{line}'"),
        ));
    };

    if !tag_str.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(malformed(
            line_number,
            format!("Invalid RIS tag format: '{tag_str}'"),
        ));
    }

    let tag = RisTag::from_tag(tag_str);
    let content = extract_ris_content(line, line_number)?;

    Ok((tag, content))
}

/// Extract content from a RIS line, handling various format patterns.
fn extract_ris_content(line: &str, line_number: usize) -> Result<String, ParseError> {
    let rest = &line[2..];

    // Standard format: "TY  - JOUR", or "ER  -"
    if let Some(content) = rest.strip_prefix("  -") {
        return Ok(content.trim().to_string());
    }

    // Without spaces before dash: "TY- JOUR", "TY-JOUR"
    if let Some(content) = rest.strip_prefix('-') {
        return Ok(content.trim().to_string());
    }

    // Space separated: "TY JOUR"
    if rest.starts_with(' ') {
        return Ok(rest.trim().to_string());
    }

    Err(malformed(
        line_number,
        format!("RIS line missing proper separator (space or dash) after tag: '{line}'"),
    ))
}

fn malformed(line_number: usize, message: String) -> ParseError {
    ParseError::at_line(line_number, Format::Ris, ValueError::MalformedEntry(message))
}

/// Parse a "Family, Given" name into an agent.
fn parse_author(author_str: &str) -> Agent {
    agent_from_name(author_str)
}

/// Check if a line is an export header that should be ignored.
pub(crate) fn is_metadata_line(line: &str) -> bool {
    line.starts_with("Record #")
        || line.starts_with("Provider:")
        || line.starts_with("Content:")
        || line.starts_with("Database:")
}
