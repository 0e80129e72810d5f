//! BibTeX tokenizing.
//!
//! Entries are read with `biblatex`, which expands `@string` macros and skips
//! `@comment` and `@preamble` blocks. Field interpretation lives in
//! `structure`.

use crate::Format;
use crate::bibtex::structure::RawBibtexEntry;
use crate::error::{ParseError, ValueError};
use biblatex::{Bibliography, Chunk, Entry, Spanned};

/// Parse BibTeX text, returning every regular entry in order.
pub(crate) fn bibtex_parse(text: &str) -> Result<Vec<RawBibtexEntry>, ParseError> {
    let bibliography = Bibliography::parse(text).map_err(|error| {
        ParseError::at_line(
            line_at(text, error.span.start),
            Format::Bibtex,
            ValueError::MalformedEntry(error.kind.to_string()),
        )
    })?;
    Ok(bibliography.iter().map(raw_entry).collect())
}

fn raw_entry(entry: &Entry) -> RawBibtexEntry {
    let mut raw = RawBibtexEntry::new(
        entry.entry_type.to_string().to_lowercase(),
        entry.key.clone(),
    );
    for (name, chunks) in &entry.fields {
        raw.add_field(name.to_lowercase(), raw_value(chunks));
    }
    raw
}

/// Renders a field value with its inner braces restored, so that braced
/// corporate names stay recognizable.
fn raw_value(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|chunk| match &chunk.v {
            Chunk::Normal(text) => text.clone(),
            Chunk::Verbatim(text) => format!("{{{text}}}"),
            Chunk::Math(text) => format!("${text}$"),
        })
        .collect()
}

/// 1-based line of a byte offset.
fn line_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_simple_entry() {
        let input = r#"@article{smith2020,
  title = {Test {Article} Title},
  author = "Smith, John and Doe, Jane",
  year = 2020
}"#;
        let entries = bibtex_parse(input).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.entry_type, "article");
        assert_eq!(entry.key, "smith2020");
        assert_eq!(entry.raw("title"), Some("Test {Article} Title"));
        assert_eq!(entry.raw("author"), Some("Smith, John and Doe, Jane"));
        assert_eq!(entry.get("year").as_deref(), Some("2020"));
    }

    #[test]
    fn test_corporate_author_keeps_braces() {
        let input = "@misc{topmed,\n  author = {{TOPMed} and Doe, Jane}\n}";
        let entries = bibtex_parse(input).unwrap();
        assert_eq!(entries[0].raw("author"), Some("{TOPMed} and Doe, Jane"));
    }

    #[test]
    fn test_comments_and_string_macros() {
        let input = r#"@comment{ignored block}
@preamble{"\newcommand{\noop}[1]{}"}
@string{plos = "PLoS"}
@Article{ralser2006,
  journal = plos # " ONE",
  doi = {10.1371/journal.pone.0000030},
}"#;
        let entries = bibtex_parse(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, "article");
        assert_eq!(entries[0].get("journal").as_deref(), Some("PLoS ONE"));
        assert_eq!(
            entries[0].get("doi").as_deref(),
            Some("10.1371/journal.pone.0000030")
        );
    }

    #[test]
    fn test_multiple_entries_keep_order() {
        let input = "@misc{a, title = {First}}\n\n@book{b, title = {Second}}";
        let entries = bibtex_parse(input).unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[rstest]
    #[case("@article{key,\n  title = {unbalanced\n}")]
    #[case("@article{key,\n  title {missing equals}\n}")]
    #[case("@article{key,\n  title = {ok},\n")]
    fn test_malformed_entries(#[case] input: &str) {
        let error = bibtex_parse(input).unwrap_err();
        assert_eq!(error.format, Format::Bibtex);
        assert!(matches!(error.error, ValueError::MalformedEntry(_)));
        assert!(error.line.is_some_and(|line| line >= 1));
    }

    #[rstest]
    #[case("first line", 0, 1)]
    #[case("first\nsecond\nthird", 7, 2)]
    #[case("first\nsecond", 100, 2)]
    fn test_line_at(#[case] text: &str, #[case] offset: usize, #[case] line: usize) {
        assert_eq!(line_at(text, offset), line);
    }

    #[test]
    fn test_empty_input() {
        assert!(bibtex_parse("").unwrap().is_empty());
        assert!(bibtex_parse("no entries here").unwrap().is_empty());
    }
}
