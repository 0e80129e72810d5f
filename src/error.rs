//! Error types for detection, parsing and serialization.
//!
//! Conversion aborts on three kinds of failure:
//!
//! - [`DetectionError`]: the input is structurally unrecognized.
//! - [`ParseError`]: the format was recognized but the content is malformed.
//! - [`WriteError`]: the target writer could not produce its output.
//!
//! A failing [`ResolveError`] is logged and surfaces as
//! [`DetectionError::EmptyInput`].
//!
//! Non-conformance reported by a [`Validator`](crate::lint::Validator) or a
//! [`JsonLinter`](crate::lint::JsonLinter) is *not* an error: it is recorded in
//! [`Metadata::errors`](crate::Metadata::errors) and the conversion continues.

use crate::Format;
use crate::identifier::IdentifierKind;
use thiserror::Error;

/// Umbrella error for a full conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// The input could not be classified as any supported format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// Blank input, or the resolver produced no content.
    #[error("no content to detect")]
    EmptyInput,

    /// Content present but no format fingerprint matched.
    #[error("format not recognized")]
    Unrecognized,

    /// The input is a bare identifier that still has to be resolved to content.
    #[error("input is a bare {0} identifier, not metadata content")]
    UnresolvedIdentifier(IdentifierKind),
}

/// What went wrong inside a recognized format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("malformed entry: {0}")]
    MalformedEntry(String),

    #[error("missing {field} ({key})")]
    MissingValue {
        field: &'static str,
        key: &'static str,
    },
}

/// A recognized format whose content could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line of the failure, when the reader can tell.
    pub line: Option<usize>,
    /// Format the reader was handling.
    pub format: Format,
    /// Failure kind.
    pub error: ValueError,
}

impl ParseError {
    pub fn at_line(line: usize, format: Format, error: ValueError) -> Self {
        Self {
            line: Some(line),
            format,
            error,
        }
    }

    pub fn without_position(format: Format, error: ValueError) -> Self {
        Self {
            line: None,
            format,
            error,
        }
    }

    /// Maps a `serde_json` failure, keeping its line.
    pub(crate) fn json(format: Format, err: serde_json::Error) -> Self {
        let error = ValueError::MalformedJson(err.to_string());
        match err.line() {
            0 => Self::without_position(format, error),
            line => Self::at_line(line, format, error),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} parse error at line {}: {}", self.format, line, self.error),
            None => write!(f, "{} parse error: {}", self.format, self.error),
        }
    }
}

/// A writer failed to render a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot write {format}: {message}")]
pub struct WriteError {
    pub format: Format,
    pub message: String,
}

impl WriteError {
    pub(crate) fn new(format: Format, message: impl std::fmt::Display) -> Self {
        Self {
            format,
            message: message.to_string(),
        }
    }
}

/// A format name that [`Format`](crate::Format) does not know.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown format name: {0}")]
pub struct UnknownFormat(pub String);

/// A [`Resolver`](crate::Resolver) could not fetch content.
///
/// The converter treats this as absent content rather than a hard failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("nothing found for {0}")]
    NotFound(String),

    #[error("cannot fetch {input}: {message}")]
    Unavailable { input: String, message: String },
}
