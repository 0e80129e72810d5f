//! BibTeX reader and writer.
//!
//! Only the first regular entry of a file is read; `@comment`, `@preamble`
//! and `@string` blocks are handled but never become records.
//!
//! # Example
//!
//! ```
//! use bibmeta::{BibtexFormat, MetadataFormat};
//!
//! let input = r#"@article{smith2020,
//!   author = {Smith, John},
//!   title = {Example Title},
//!   doi = {10.1000/EXAMPLE},
//!   year = {2020}
//! }"#;
//!
//! let metadata = BibtexFormat.parse(input).unwrap();
//! assert_eq!(metadata.title(), Some("Example Title"));
//! assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.1000/example"));
//! assert_eq!(metadata.creators[0].family_name.as_deref(), Some("Smith"));
//! ```

mod parse;
mod structure;
mod write;

use crate::error::{ParseError, ValueError, WriteError};
use crate::metadata::Metadata;
use crate::regex::Regex;
use crate::{Format, MetadataFormat, Sniff};
use once_cell::sync::Lazy;
use parse::bibtex_parse;

static ENTRY_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\w+\s*\{").unwrap());

/// BibTeX entries, `.bib`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BibtexFormat;

impl MetadataFormat for BibtexFormat {
    fn format(&self) -> Format {
        Format::Bibtex
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        ENTRY_START.is_match(sniff.text())
    }

    /// # Errors
    ///
    /// Returns a `MalformedEntry` error for unbalanced braces or a broken
    /// field list, and when the input holds no entry at all.
    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let entries = bibtex_parse(content)?;
        if entries.len() > 1 {
            tracing::debug!(count = entries.len(), "reading the first of several BibTeX entries");
        }
        entries.into_iter().next().map(Metadata::from).ok_or_else(|| {
            ParseError::without_position(
                Format::Bibtex,
                ValueError::MalformedEntry("no entry found".to_string()),
            )
        })
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        Ok(write::bibtex_write(metadata))
    }
}
