//! Detect and convert scholarly-work metadata between registry, linked-data and
//! reference-manager formats.
//!
//! `bibmeta` reads any of nine metadata formats into one canonical
//! [`Metadata`] record and writes that record back out in any of them.
//!
//! # Supported Formats
//!
//! | Name            | Description                               | Extension |
//! |-----------------|-------------------------------------------|-----------|
//! | `datacite`      | DataCite kernel-4 XML                     | `xml`     |
//! | `crossref`      | Crossref deposit / query XML              | `xml`     |
//! | `codemeta`      | CodeMeta JSON-LD                          | `json`    |
//! | `schema_org`    | schema.org JSON-LD                        | `json`    |
//! | `datacite_json` | DataCite JSON                             | `json`    |
//! | `crossref_json` | Crossref REST API work message            | `json`    |
//! | `citeproc`      | CSL-JSON                                  | `json`    |
//! | `bibtex`        | BibTeX                                    | `bib`     |
//! | `ris`           | RIS                                       | `ris`     |
//!
//! # Basic Usage
//!
//! ```rust
//! use bibmeta::{Converter, Format};
//!
//! let input = r#"@article{https://doi.org/10.7554/elife.01567,
//!   doi = {10.7554/eLife.01567},
//!   title = {Automated quantitative histology reveals vascular morphodynamics},
//!   author = {Sankar, Martial and Nieminen, Kaisa},
//!   journal = {eLife},
//!   year = {2014}
//! }"#;
//!
//! let converter = Converter::new();
//! let metadata = converter.read(input).unwrap();
//! assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.7554/elife.01567"));
//! assert_eq!(metadata.types.bibtex.as_deref(), Some("article"));
//!
//! let ris = converter.convert(input, Format::Ris).unwrap();
//! assert!(ris.starts_with("TY  - JOUR"));
//! ```
//!
//! # Format Detection
//!
//! ```rust
//! use bibmeta::{detect, Detection, Format};
//!
//! assert_eq!(detect("TY  - JOUR\nER  - ", None), Detection::Format(Format::Ris));
//! assert_eq!(detect("no metadata here", None), Detection::Unknown);
//! ```
//!
//! # Error Handling
//!
//! Conversions return [`Result`], whose error is a [`ConversionError`]:
//!
//! ```rust
//! use bibmeta::{Converter, ConversionError, DetectionError, Format};
//!
//! match Converter::new().convert("garbage", Format::Bibtex) {
//!     Err(ConversionError::Detection(DetectionError::Unrecognized)) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! Schema validation and JSON linting are pluggable collaborators; their
//! findings land in [`Metadata::errors`] instead of aborting (see [`lint`]).
//!
//! # Thread Safety
//!
//! Every format is a stateless unit struct and all lookup tables are
//! immutable statics, so conversions can run on any number of threads.

use std::str::FromStr;

pub mod bibtex;
pub mod citeproc;
pub mod codemeta;
pub mod convert;
pub mod crossref;
pub mod crosswalk;
pub mod datacite;
pub mod detect;
pub mod error;
pub mod identifier;
pub mod lint;
pub mod metadata;
pub mod ris;
pub mod schema_org;

mod json;
mod regex;
mod utils;
mod xml;

#[cfg(test)]
mod fixtures;

// Reexports
pub use bibtex::BibtexFormat;
pub use citeproc::CiteprocFormat;
pub use codemeta::CodemetaFormat;
pub use convert::{ConversionOptions, Converter, Resolved, Resolver};
pub use crossref::{CrossrefJsonFormat, CrossrefXmlFormat};
pub use crosswalk::{Vocabulary, translate};
pub use datacite::{DataciteJsonFormat, DataciteXmlFormat};
pub use detect::{Detection, Sniff, detect, detect_format};
pub use error::{
    ConversionError, DetectionError, ParseError, ResolveError, UnknownFormat, ValueError,
    WriteError,
};
pub use lint::{JsonLinter, StrictJsonLinter, Validator};
pub use metadata::Metadata;
pub use ris::RisFormat;
pub use schema_org::SchemaOrgFormat;

/// A specialized Result type for conversions.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// The supported metadata formats, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    DataciteXml,
    CrossrefXml,
    Codemeta,
    SchemaOrg,
    DataciteJson,
    CrossrefJson,
    Citeproc,
    Bibtex,
    Ris,
}

impl Format {
    pub const ALL: [Format; 9] = [
        Format::DataciteXml,
        Format::CrossrefXml,
        Format::Codemeta,
        Format::SchemaOrg,
        Format::DataciteJson,
        Format::CrossrefJson,
        Format::Citeproc,
        Format::Bibtex,
        Format::Ris,
    ];

    /// The format's name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Format::DataciteXml => "datacite",
            Format::CrossrefXml => "crossref",
            Format::Codemeta => "codemeta",
            Format::SchemaOrg => "schema_org",
            Format::DataciteJson => "datacite_json",
            Format::CrossrefJson => "crossref_json",
            Format::Citeproc => "citeproc",
            Format::Bibtex => "bibtex",
            Format::Ris => "ris",
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::DataciteXml | Format::CrossrefXml => "xml",
            Format::Bibtex => "bib",
            Format::Ris => "ris",
            _ => "json",
        }
    }

    pub fn is_xml(self) -> bool {
        self.extension() == "xml"
    }

    pub fn is_json(self) -> bool {
        self.extension() == "json"
    }

    /// The reader/writer registered for this format.
    pub fn handler(self) -> &'static dyn MetadataFormat {
        match self {
            Format::DataciteXml => &DataciteXmlFormat,
            Format::CrossrefXml => &CrossrefXmlFormat,
            Format::Codemeta => &CodemetaFormat,
            Format::SchemaOrg => &SchemaOrgFormat,
            Format::DataciteJson => &DataciteJsonFormat,
            Format::CrossrefJson => &CrossrefJsonFormat,
            Format::Citeproc => &CiteprocFormat,
            Format::Bibtex => &BibtexFormat,
            Format::Ris => &RisFormat,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Reader and writer for one metadata format.
///
/// Implementations are stateless; the registry in [`FORMATS`] holds one
/// instance of each.
pub trait MetadataFormat: Send + Sync {
    fn format(&self) -> Format;

    /// Whether sniffed content carries this format's fingerprint.
    fn recognizes(&self, sniff: &Sniff<'_>) -> bool;

    /// Reads the first record in `content`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the content is not well-formed for this format.
    fn parse(&self, content: &str) -> std::result::Result<Metadata, ParseError>;

    /// Renders a record.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` if the output could not be produced.
    fn serialize(&self, metadata: &Metadata) -> std::result::Result<String, WriteError>;

    /// Content parses and the resulting record is valid.
    fn is_valid(&self, content: &str) -> bool {
        self.parse(content).is_ok_and(|metadata| metadata.is_valid())
    }

    /// Content parses into a record with any descriptive content.
    fn exists(&self, content: &str) -> bool {
        self.parse(content).is_ok_and(|metadata| !metadata.is_empty())
    }
}

/// Every format, in detection order.
pub static FORMATS: &[&dyn MetadataFormat] = &[
    &DataciteXmlFormat,
    &CrossrefXmlFormat,
    &CodemetaFormat,
    &SchemaOrgFormat,
    &DataciteJsonFormat,
    &CrossrefJsonFormat,
    &CiteprocFormat,
    &BibtexFormat,
    &RisFormat,
];
