//! schema.org JSON-LD reader and writer.
//!
//! A top-level array is accepted and its first object read, which is how
//! catalog pages often embed several works.
//!
//! # Example
//!
//! ```
//! use bibmeta::{MetadataFormat, SchemaOrgFormat};
//!
//! let input = r#"{
//!   "@context": "http://schema.org",
//!   "@type": "Dataset",
//!   "@id": "https://doi.org/10.5061/DRYAD.8515",
//!   "name": "Data from: A new malaria agent",
//!   "author": [{"@type": "Person", "givenName": "Ellen", "familyName": "Martin"}]
//! }"#;
//!
//! let metadata = SchemaOrgFormat.parse(input).unwrap();
//! assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.5061/dryad.8515"));
//! assert_eq!(metadata.types.resource_type_general.as_deref(), Some("Dataset"));
//! assert_eq!(metadata.creators[0].name, "Ellen Martin");
//! ```

mod parse;
mod write;

use crate::error::{ParseError, WriteError};
use crate::json;
use crate::metadata::Metadata;
use crate::{Format, MetadataFormat, Sniff};

pub(crate) use parse::{agents, read_linked_data};
pub(crate) use write::{license, person_or_organization};

/// schema.org JSON-LD, `.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOrgFormat;

impl MetadataFormat for SchemaOrgFormat {
    fn format(&self) -> Format {
        Format::SchemaOrg
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.context_mentions("schema.org")
    }

    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let map = json::parse_object(content, Format::SchemaOrg)?;
        Ok(read_linked_data(&map))
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        json::to_pretty(&write::CreativeWork::from(metadata), Format::SchemaOrg)
    }
}
