//! Format detection from raw content and an optional file-extension hint.
//!
//! Content is sniffed once into a [`Sniff`]; every registered format then
//! inspects that same view through [`MetadataFormat::recognizes`](crate::MetadataFormat::recognizes).
//! Detection is pure and never touches the network.

use crate::error::DetectionError;
use crate::identifier::{IdentifierKind, identifier_kind};
use crate::{FORMATS, Format};
use serde_json::{Map, Value};
use tracing::debug;

/// Outcome of classifying raw content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The content is a record in this format.
    Format(Format),
    /// The content is a bare identifier that still needs resolving.
    Identifier(IdentifierKind),
    Unknown,
}

impl Detection {
    /// The detected format, or why there is none.
    ///
    /// # Errors
    ///
    /// `UnresolvedIdentifier` for a bare identifier, `Unrecognized` otherwise.
    pub fn into_format(self) -> Result<Format, DetectionError> {
        match self {
            Detection::Format(format) => Ok(format),
            Detection::Identifier(kind) => Err(DetectionError::UnresolvedIdentifier(kind)),
            Detection::Unknown => Err(DetectionError::Unrecognized),
        }
    }
}

/// The parts of raw content every format check looks at.
#[derive(Debug, Clone)]
pub struct Sniff<'a> {
    text: &'a str,
    json: Option<Map<String, Value>>,
    xml_root: Option<(String, Vec<String>)>,
}

impl<'a> Sniff<'a> {
    pub fn new(content: &'a str) -> Self {
        let text = content.trim_start_matches('\u{feff}').trim();
        let json = if text.starts_with('{') || text.starts_with('[') {
            serde_json::from_str(text).ok().and_then(crate::json::first_object)
        } else {
            None
        };
        let xml_root = if text.starts_with('<') {
            crate::xml::root_element(text)
        } else {
            None
        };
        Self {
            text,
            json,
            xml_root,
        }
    }

    /// Content without surrounding whitespace.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// The record object when the content is JSON (first item of a top-level array).
    pub fn json(&self) -> Option<&Map<String, Value>> {
        self.json.as_ref()
    }

    /// Local name of the root element when the content is XML.
    pub fn xml_root(&self) -> Option<&str> {
        self.xml_root.as_ref().map(|(name, _)| name.as_str())
    }

    /// Namespace URIs declared on the root element.
    pub fn xml_namespaces(&self) -> &[String] {
        self.xml_root
            .as_ref()
            .map(|(_, namespaces)| namespaces.as_slice())
            .unwrap_or_default()
    }

    /// Whether the JSON-LD `@context` mentions `needle` anywhere.
    pub fn context_mentions(&self, needle: &str) -> bool {
        self.json()
            .and_then(|map| map.get("@context"))
            .is_some_and(|context| context.to_string().contains(needle))
    }

    /// First line that is not blank.
    pub fn first_line(&self) -> &'a str {
        self.text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or_default()
    }
}

/// Classifies `content`, trying the format matching `extension` first.
///
/// An extension alone never decides: the format must also recognize the
/// content. Blank content is [`Detection::Unknown`].
pub fn detect(content: &str, extension: Option<&str>) -> Detection {
    let sniff = Sniff::new(content);
    if sniff.is_blank() {
        debug!("blank content");
        return Detection::Unknown;
    }

    let hint = extension.map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase());
    if let Some(hint) = hint.as_deref() {
        if let Some(handler) = FORMATS
            .iter()
            .find(|handler| handler.format().extension() == hint && handler.recognizes(&sniff))
        {
            debug!(format = %handler.format(), extension = hint, "detected from extension hint");
            return Detection::Format(handler.format());
        }
    }

    if let Some(handler) = FORMATS.iter().find(|handler| handler.recognizes(&sniff)) {
        debug!(format = %handler.format(), "detected from content");
        return Detection::Format(handler.format());
    }

    match identifier_kind(sniff.text()) {
        Some(kind) => {
            debug!(%kind, "content is a bare identifier");
            Detection::Identifier(kind)
        }
        None => {
            debug!("no format recognized");
            Detection::Unknown
        }
    }
}

/// [`detect`], distinguishing blank content from unrecognized content.
///
/// # Errors
///
/// `EmptyInput` for blank content, otherwise as [`Detection::into_format`].
pub fn detect_format(content: &str, extension: Option<&str>) -> Result<Format, DetectionError> {
    if content.trim().is_empty() {
        return Err(DetectionError::EmptyInput);
    }
    detect(content, extension).into_format()
}
