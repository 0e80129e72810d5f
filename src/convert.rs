//! The conversion pipeline.
//!
//! Resolver → detection → reader → identifier override and diagnostics → writer.
//!
//! ```
//! use bibmeta::{ConversionOptions, Converter, Format};
//!
//! let ris = "TY  - DATA\nT1  - Ozone measurements\nDO  - 10.5061/DRYAD.8515\nER  - \n";
//! let options = ConversionOptions::new().with_doi("10.5061/dryad.0000");
//! let metadata = Converter::new().with_options(options).read(ris).unwrap();
//! assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.5061/dryad.0000"));
//! assert_eq!(metadata.types.schema_org.as_deref(), Some("Dataset"));
//! ```

use crate::error::{DetectionError, ResolveError};
use crate::identifier::{doi_from_url, normalize_doi};
use crate::lint::{JsonLinter, Validator};
use crate::datacite::{self, DataciteXmlFormat};
use crate::{Format, Metadata, MetadataFormat, Result, detect_format};
use tracing::{debug, warn};

/// Content fetched for an identifier or path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    /// File extension of the source, when known; used as a detection hint.
    pub extension: Option<String>,
}

impl Resolved {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// Fetches the content behind an identifier or path.
pub trait Resolver {
    /// # Errors
    ///
    /// Returns `ResolveError` when nothing can be fetched.
    fn resolve(&self, input: &str) -> std::result::Result<Resolved, ResolveError>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> std::result::Result<Resolved, ResolveError>,
{
    fn resolve(&self, input: &str) -> std::result::Result<Resolved, ResolveError> {
        self(input)
    }
}

/// Per-conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Skip detection and read the content as this format.
    pub from: Option<Format>,
    /// File extension hint for detection.
    pub extension: Option<String>,
    /// Replaces the record's DOI.
    pub doi: Option<String>,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: Format) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }
}

/// Reads records and writes them in another format.
///
/// Diagnostics from the optional [`Validator`] (run on the DataCite XML form
/// of every record) and [`JsonLinter`] (JSON formats) are appended to
/// [`Metadata::errors`].
#[derive(Default, Clone)]
pub struct Converter<'a> {
    options: ConversionOptions,
    validator: Option<&'a dyn Validator>,
    linter: Option<&'a dyn JsonLinter>,
}

impl<'a> Converter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_validator(mut self, validator: &'a dyn Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_linter(mut self, linter: &'a dyn JsonLinter) -> Self {
        self.linter = Some(linter);
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Reads raw content into a record.
    ///
    /// # Errors
    ///
    /// Fails when the content cannot be classified or does not parse.
    pub fn read(&self, content: &str) -> Result<Metadata> {
        self.read_with_hint(content, self.options.extension.as_deref())
    }

    /// Resolves `input` first, then reads what came back.
    ///
    /// A resolver failure counts as absent content.
    ///
    /// # Errors
    ///
    /// `EmptyInput` when resolving fails, otherwise as [`Converter::read`].
    pub fn read_resolved(&self, resolver: &dyn Resolver, input: &str) -> Result<Metadata> {
        let resolved = match resolver.resolve(input) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!(input, %error, "resolver failed");
                return Err(DetectionError::EmptyInput.into());
            }
        };
        let hint = self
            .options
            .extension
            .as_deref()
            .or(resolved.extension.as_deref());
        self.read_with_hint(&resolved.text, hint)
    }

    /// Renders a record.
    ///
    /// # Errors
    ///
    /// Propagates the writer's `WriteError`.
    pub fn write(&self, metadata: &Metadata, to: Format) -> Result<String> {
        debug!(format = %to, "writing");
        Ok(to.handler().serialize(metadata)?)
    }

    /// Reads raw content and writes it as `to`.
    ///
    /// # Errors
    ///
    /// See [`Converter::read`] and [`Converter::write`].
    pub fn convert(&self, content: &str, to: Format) -> Result<String> {
        let metadata = self.read(content)?;
        self.write(&metadata, to)
    }

    /// Resolves, reads and writes.
    ///
    /// # Errors
    ///
    /// See [`Converter::read_resolved`] and [`Converter::write`].
    pub fn convert_resolved(&self, resolver: &dyn Resolver, input: &str, to: Format) -> Result<String> {
        let metadata = self.read_resolved(resolver, input)?;
        self.write(&metadata, to)
    }

    fn read_with_hint(&self, content: &str, extension: Option<&str>) -> Result<Metadata> {
        let format = match self.options.from {
            Some(format) => format,
            None => detect_format(content, extension)?,
        };
        debug!(%format, "reading");

        let mut metadata = format.handler().parse(content)?;
        if let Some(doi) = self.options.doi.as_deref() {
            self.override_doi(&mut metadata, doi);
        }
        self.collect_diagnostics(format, content, &mut metadata);
        Ok(metadata)
    }

    fn override_doi(&self, metadata: &mut Metadata, doi: &str) {
        match normalize_doi(doi) {
            Some(identifier) => {
                metadata.identifier = Some(identifier);
                metadata.doi = doi_from_url(doi);
            }
            None => warn!(doi, "ignoring DOI override that is not a DOI"),
        }
    }

    /// Linter output for JSON input, then validator output for the DataCite
    /// XML form of the record. DataCite XML input is validated as given.
    fn collect_diagnostics(&self, format: Format, content: &str, metadata: &mut Metadata) {
        let mut messages = Vec::new();
        if let Some(linter) = self.linter.filter(|_| format.is_json()) {
            messages.extend(linter.lint(content));
        }
        if let Some(validator) = self.validator {
            if format == Format::DataciteXml {
                messages.extend(validator.validate(content, metadata.schema_version.as_deref()));
            } else {
                match DataciteXmlFormat.serialize(metadata) {
                    Ok(rendered) => messages.extend(
                        validator.validate(&rendered, Some(datacite::schema_version(metadata))),
                    ),
                    Err(error) => warn!(%format, %error, "skipping validation"),
                }
            }
        }

        for message in &messages {
            warn!(%format, message = message.as_str(), "diagnostic");
        }
        metadata.errors.extend(messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::fixtures;
    use crate::identifier::IdentifierKind;
    use crate::lint::StrictJsonLinter;
    use crate::metadata::RelatedIdentifier;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_registry_xml_is_read_as_datacite() {
        let metadata = Converter::new().read(fixtures::DATACITE_XML).unwrap();
        assert!(metadata.is_valid());
        assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.5438/4k3m-nyvg"));
        assert_eq!(metadata.types.resource_type_general.as_deref(), Some("Text"));
    }

    #[test]
    fn test_bibtex_entry_types() {
        let metadata = Converter::new().read(fixtures::BIBTEX).unwrap();
        assert_eq!(metadata.types.bibtex.as_deref(), Some("article"));
        assert_eq!(metadata.types.schema_org.as_deref(), Some("ScholarlyArticle"));
    }

    #[test]
    fn test_blog_posting_types() {
        let metadata = Converter::new().read(fixtures::SCHEMA_ORG).unwrap();
        assert_eq!(metadata.types.schema_org.as_deref(), Some("BlogPosting"));
        assert_eq!(metadata.types.bibtex.as_deref(), Some("article"));
    }

    #[test]
    fn test_duplicate_keys_become_diagnostics() {
        let linter = StrictJsonLinter;
        let converter = Converter::new().with_linter(&linter);
        let metadata = converter.read(fixtures::DATACITE_JSON_OVERLAPPING_KEYS).unwrap();
        assert_eq!(metadata.errors, vec!["The same key is defined more than once: id"]);
        assert!(!metadata.is_valid());
        assert!(metadata.identifier.is_some());
    }

    #[test]
    fn test_related_identifiers_keep_source_order() {
        let metadata = Converter::new().read(fixtures::SCHEMA_ORG).unwrap();
        assert_eq!(metadata.related_identifiers.len(), 3);
        assert_eq!(
            metadata.related_identifiers.last(),
            Some(&RelatedIdentifier {
                related_identifier: "10.5438/55e5-t5c0".to_string(),
                related_identifier_type: "DOI".to_string(),
                relation_type: "References".to_string(),
                resource_type_general: None,
            })
        );
    }

    #[test]
    fn test_doi_override() {
        let options = ConversionOptions::new().with_doi("10.5438/0000-00SS");
        let metadata = Converter::new()
            .with_options(options)
            .read(fixtures::SCHEMA_ORG)
            .unwrap();
        assert!(metadata.is_valid());
        assert_eq!(metadata.identifier.as_deref(), Some("https://doi.org/10.5438/0000-00ss"));
        assert_eq!(metadata.doi.as_deref(), Some("10.5438/0000-00SS"));
        assert_eq!(metadata.url.as_deref(), Some("https://blog.datacite.org/eating-your-own-dog-food"));
        assert_eq!(metadata.types.citeproc.as_deref(), Some("post-weblog"));
    }

    #[test]
    fn test_from_skips_detection() {
        let options = ConversionOptions::new().with_from(Format::Citeproc);
        let converter = Converter::new().with_options(options);
        let metadata = converter.read(fixtures::CITEPROC).unwrap();
        assert_eq!(metadata.types.citeproc.as_deref(), Some("post-weblog"));

        let error = converter.read("TY  - JOUR\nER  - ").unwrap_err();
        assert!(matches!(
            error,
            ConversionError::Parse(ref e) if e.format == Format::Citeproc
        ));
    }

    #[test]
    fn test_unrecognized_and_identifier_input() {
        let converter = Converter::new();
        assert!(matches!(
            converter.read("definitely not metadata"),
            Err(ConversionError::Detection(DetectionError::Unrecognized))
        ));
        assert!(matches!(
            converter.read(""),
            Err(ConversionError::Detection(DetectionError::EmptyInput))
        ));
        assert!(matches!(
            converter.read("https://doi.org/10.5438/4K3M-NYVG"),
            Err(ConversionError::Detection(DetectionError::UnresolvedIdentifier(
                IdentifierKind::Doi
            )))
        ));
    }

    #[test]
    fn test_validator_messages_are_folded_in() {
        let validator = |_: &str, schema: Option<&str>| {
            vec![format!(
                "43:0: ERROR: publisher is empty (schema {})",
                schema.unwrap_or("unknown")
            )]
        };
        let linter = |_: &str| vec!["never called for XML".to_string()];
        let metadata = Converter::new()
            .with_validator(&validator)
            .with_linter(&linter)
            .read(fixtures::DATACITE_XML)
            .unwrap();
        assert_eq!(
            metadata.errors,
            vec!["43:0: ERROR: publisher is empty (schema http://datacite.org/schema/kernel-4)"]
        );
        assert!(!metadata.is_valid());
    }

    #[test]
    fn test_linked_data_is_validated_as_datacite_xml() {
        let validator = |xml: &str, schema: Option<&str>| {
            assert!(xml.contains("<resource"));
            vec![format!(
                "ERROR: publisher has to be at least 1 characters long (schema {})",
                schema.unwrap_or("unknown")
            )]
        };
        let metadata = Converter::new()
            .with_validator(&validator)
            .read(fixtures::SCHEMA_ORG)
            .unwrap();
        assert_eq!(
            metadata.errors,
            vec![
                "ERROR: publisher has to be at least 1 characters long (schema http://datacite.org/schema/kernel-4)"
            ]
        );
        assert!(!metadata.is_valid());
    }

    #[test]
    fn test_resolver_content_and_extension() {
        let resolver = |input: &str| {
            if input == "crossref.ris" {
                Ok(Resolved::new(fixtures::RIS).with_extension("ris"))
            } else {
                Err(ResolveError::NotFound(input.to_string()))
            }
        };
        let converter = Converter::new();

        let metadata = converter.read_resolved(&resolver, "crossref.ris").unwrap();
        assert_eq!(metadata.types.ris.as_deref(), Some("JOUR"));

        assert!(matches!(
            converter.read_resolved(&resolver, "https://doi.org/10.1000/missing"),
            Err(ConversionError::Detection(DetectionError::EmptyInput))
        ));
    }

    #[rstest]
    #[case(fixtures::DATACITE_XML)]
    #[case(fixtures::CROSSREF_XML)]
    #[case(fixtures::CODEMETA)]
    #[case(fixtures::SCHEMA_ORG)]
    #[case(fixtures::DATACITE_JSON)]
    #[case(fixtures::CROSSREF_JSON)]
    #[case(fixtures::CITEPROC)]
    #[case(fixtures::BIBTEX)]
    #[case(fixtures::RIS)]
    fn test_every_pair_converts(#[case] content: &str) {
        let converter = Converter::new();
        let source = converter.read(content).unwrap();
        for to in Format::ALL {
            let output = converter.convert(content, to).unwrap();
            assert_eq!(crate::detect(&output, None), crate::Detection::Format(to));

            let reread = converter.read(&output).unwrap();
            assert_eq!(reread.identifier, source.identifier, "{to}");
            assert_eq!(reread.title(), source.title(), "{to}");
        }
    }
}
