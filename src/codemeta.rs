//! CodeMeta JSON-LD reader and writer.
//!
//! CodeMeta documents are read with the linked-data reader shared with
//! schema.org, which also understands the CodeMeta key names.
//!
//! # Example
//!
//! ```
//! use bibmeta::{CodemetaFormat, MetadataFormat};
//!
//! let input = r#"{
//!   "@context": "https://raw.githubusercontent.com/codemeta/codemeta/master/codemeta.jsonld",
//!   "@type": "SoftwareSourceCode",
//!   "@id": "https://doi.org/10.5438/QEG0-3GM3",
//!   "codeRepository": "https://github.com/datacite/maremma",
//!   "title": "Maremma: a Ruby library for simplified network calls",
//!   "tags": ["faraday", "excon"]
//! }"#;
//!
//! let metadata = CodemetaFormat.parse(input).unwrap();
//! assert_eq!(metadata.url.as_deref(), Some("https://github.com/datacite/maremma"));
//! assert_eq!(metadata.types.resource_type_general.as_deref(), Some("Software"));
//! assert_eq!(metadata.subjects.len(), 2);
//! ```

use crate::crosswalk::Vocabulary;
use crate::error::{ParseError, WriteError};
use crate::json;
use crate::metadata::{DateType, Metadata};
use crate::schema_org::{license, person_or_organization, read_linked_data};
use crate::{Format, MetadataFormat, Sniff};
use serde::Serialize;
use serde_json::Value;

const CODEMETA_CONTEXT: &str = "https://doi.org/10.5063/schema/codemeta-2.0";

/// CodeMeta software metadata, `.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodemetaFormat;

impl MetadataFormat for CodemetaFormat {
    fn format(&self) -> Format {
        Format::Codemeta
    }

    fn recognizes(&self, sniff: &Sniff<'_>) -> bool {
        sniff.context_mentions("codemeta")
    }

    fn parse(&self, content: &str) -> Result<Metadata, ParseError> {
        let map = json::parse_object(content, Format::Codemeta)?;
        Ok(read_linked_data(&map))
    }

    fn serialize(&self, metadata: &Metadata) -> Result<String, WriteError> {
        json::to_pretty(&SoftwareSourceCode::from(metadata), Format::Codemeta)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SoftwareSourceCode {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code_repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    agents: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<String>,
}

impl From<&Metadata> for SoftwareSourceCode {
    fn from(metadata: &Metadata) -> Self {
        SoftwareSourceCode {
            context: CODEMETA_CONTEXT,
            schema_type: metadata.type_in(Vocabulary::LinkedData),
            id: metadata.identifier.clone(),
            identifier: metadata.identifier.clone(),
            code_repository: metadata.url.clone(),
            title: metadata.title().map(String::from),
            agents: metadata.creators.iter().map(person_or_organization).collect(),
            description: metadata.abstract_text().map(String::from),
            version: metadata.version.clone(),
            tags: metadata.subjects.iter().map(|s| s.subject.clone()).collect(),
            date_created: metadata.date_of(DateType::Created).map(String::from),
            date_published: metadata
                .date_of(DateType::Issued)
                .or_else(|| metadata.year())
                .map(String::from),
            date_modified: metadata.date_of(DateType::Updated).map(String::from),
            publisher: metadata.publisher.clone(),
            license: license(metadata),
        }
    }
}
