//! RIS format reader and writer.
//!
//! Export headers such as `Record #1 of 2` or `Provider:` are skipped, and
//! only the first record of a file becomes metadata.
//!
//! # Example
//!
//! ```
//! use bibmeta::{MetadataFormat, RisFormat};
//!
//! let input = r#"TY  - JOUR
//! TI  - Example Title
//! AU  - Smith, John
//! ER  -"#;
//!
//! let metadata = RisFormat.parse(input).unwrap();
//! assert_eq!(metadata.title(), Some("Example Title"));
//! assert_eq!(metadata.types.schema_org.as_deref(), Some("ScholarlyArticle"));
//! ```

mod parse;
mod structure;
mod tags;
mod write;

use crate::error::{ParseError, ValueError, WriteError};
use crate::metadata::Metadata;
use crate::{Format, MetadataFormat, Sniff};
use parse::{is_metadata_line, ris_parse};

pub use tags::RisTag;

/// RIS tagged records, `.ris`.
///
/// RIS is a standardized format for bibliographic citations that uses two-letter
/// tags at the start of each line to denote different citation fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct RisFormat;

impl MetadataFormat for RisFormat {
    fn format(&self) -> Format {
        Format::Ris
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff
            .text()
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !is_metadata_line(line))
            .is_some_and(|line| line.starts_with("TY  -"))
    }

    /// # Errors
    ///
    /// Returns `MissingValue` when the input holds no record or the first
    /// record has no `TY` line.
    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let records = ris_parse(content);
        if records.len() > 1 {
            tracing::debug!(count = records.len(), "reading the first of several RIS records");
        }
        let first = records.into_iter().next().ok_or_else(|| {
            ParseError::without_position(
                Format::Ris,
                ValueError::MissingValue {
                    field: "record",
                    key: "TY",
                },
            )
        })?;
        if !first.ignored_lines.is_empty() {
            tracing::debug!(count = first.ignored_lines.len(), "RIS lines ignored");
        }
        Metadata::try_from(first)
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        Ok(write::ris_write(metadata))
    }
}
