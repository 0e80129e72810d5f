//! Controlled-vocabulary crosswalk.
//!
//! Every vocabulary maps to and from one pivot, the schema.org (linked-data)
//! type vocabulary, so adding a vocabulary costs two tables instead of one per
//! pair. The tables are static data and are never mutated.
//!
//! A term without a mapping is not an error: it resolves to the target
//! vocabulary's single fallback term.
//!
//! ```
//! use bibmeta::crosswalk::{translate, Vocabulary};
//!
//! assert_eq!(translate(Vocabulary::Bibliography, Vocabulary::LinkedData, "article"), "ScholarlyArticle");
//! assert_eq!(translate(Vocabulary::LinkedData, Vocabulary::Bibliography, "BlogPosting"), "article");
//! assert_eq!(translate(Vocabulary::LinkedData, Vocabulary::CitationTag, "BlogPosting"), "GEN");
//! ```

use serde::{Deserialize, Serialize};

/// Controlled vocabularies known to the crosswalk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vocabulary {
    /// schema.org types, the pivot.
    LinkedData,
    /// BibTeX entry types.
    Bibliography,
    /// CSL item types.
    CitationStyle,
    /// RIS `TY` values.
    CitationTag,
    /// DataCite `resourceTypeGeneral`.
    ResourceTypeGeneral,
    /// Crossref work types.
    RegistryWorkType,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 6] = [
        Vocabulary::LinkedData,
        Vocabulary::Bibliography,
        Vocabulary::CitationStyle,
        Vocabulary::CitationTag,
        Vocabulary::ResourceTypeGeneral,
        Vocabulary::RegistryWorkType,
    ];

    /// The pivot every translation is routed through.
    pub const PIVOT: Vocabulary = Vocabulary::LinkedData;

    /// The term an unmapped or unrecognized term resolves to.
    pub fn fallback(self) -> &'static str {
        self.table().fallback
    }

    /// Whether `term` belongs to this vocabulary's controlled set.
    pub fn contains(self, term: &str) -> bool {
        self.canonical(term).is_some()
    }

    /// The static copy of `term` if it belongs to the controlled set.
    fn canonical(self, term: &str) -> Option<&'static str> {
        let table = self.table();
        table
            .terms
            .iter()
            .chain(table.to_pivot.iter().map(|(t, _)| t))
            .chain(table.from_pivot.iter().map(|(_, t)| t))
            .chain(std::iter::once(&table.fallback))
            .find(|t| **t == term)
            .copied()
    }

    fn table(self) -> &'static VocabularyTable {
        match self {
            Vocabulary::LinkedData => &LINKED_DATA,
            Vocabulary::Bibliography => &BIBLIOGRAPHY,
            Vocabulary::CitationStyle => &CITATION_STYLE,
            Vocabulary::CitationTag => &CITATION_TAG,
            Vocabulary::ResourceTypeGeneral => &RESOURCE_TYPE_GENERAL,
            Vocabulary::RegistryWorkType => &REGISTRY_WORK_TYPE,
        }
    }
}

impl std::fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Vocabulary::LinkedData => "schemaOrg",
            Vocabulary::Bibliography => "bibtex",
            Vocabulary::CitationStyle => "citeproc",
            Vocabulary::CitationTag => "ris",
            Vocabulary::ResourceTypeGeneral => "resourceTypeGeneral",
            Vocabulary::RegistryWorkType => "crossref",
        })
    }
}

struct VocabularyTable {
    fallback: &'static str,
    /// Members with no mapping in either direction.
    terms: &'static [&'static str],
    to_pivot: &'static [(&'static str, &'static str)],
    from_pivot: &'static [(&'static str, &'static str)],
}

static LINKED_DATA: VocabularyTable = VocabularyTable {
    fallback: "CreativeWork",
    terms: &[
        "Article",
        "AudioObject",
        "Blog",
        "BlogPosting",
        "Book",
        "Chapter",
        "Collection",
        "CreativeWork",
        "DataCatalog",
        "Dataset",
        "Event",
        "ImageObject",
        "Movie",
        "PublicationIssue",
        "Report",
        "ScholarlyArticle",
        "Service",
        "SoftwareSourceCode",
        "Thesis",
        "VideoObject",
        "WebPage",
        "WebSite",
    ],
    to_pivot: &[],
    from_pivot: &[],
};

static BIBLIOGRAPHY: VocabularyTable = VocabularyTable {
    fallback: "misc",
    terms: &["booklet", "manual", "proceedings", "unpublished"],
    to_pivot: &[
        ("article", "ScholarlyArticle"),
        ("book", "Book"),
        ("inbook", "Chapter"),
        ("incollection", "Chapter"),
        ("inproceedings", "ScholarlyArticle"),
        ("conference", "ScholarlyArticle"),
        ("mastersthesis", "Thesis"),
        ("phdthesis", "Thesis"),
        ("techreport", "Report"),
        ("misc", "CreativeWork"),
    ],
    from_pivot: &[
        ("Article", "article"),
        ("AudioObject", "misc"),
        ("Blog", "misc"),
        ("BlogPosting", "article"),
        ("Book", "book"),
        ("Chapter", "inbook"),
        ("Collection", "misc"),
        ("CreativeWork", "misc"),
        ("DataCatalog", "misc"),
        ("Dataset", "misc"),
        ("Event", "misc"),
        ("ImageObject", "misc"),
        ("Movie", "misc"),
        ("PublicationIssue", "misc"),
        ("Report", "techreport"),
        ("ScholarlyArticle", "article"),
        ("Service", "misc"),
        ("SoftwareSourceCode", "misc"),
        ("Thesis", "phdthesis"),
        ("VideoObject", "misc"),
        ("WebPage", "misc"),
        ("WebSite", "misc"),
    ],
};

static CITATION_STYLE: VocabularyTable = VocabularyTable {
    fallback: "misc",
    terms: &["manuscript", "map", "patent", "personal_communication"],
    to_pivot: &[
        ("article", "Article"),
        ("article-journal", "ScholarlyArticle"),
        ("article-magazine", "Article"),
        ("article-newspaper", "Article"),
        ("book", "Book"),
        ("broadcast", "VideoObject"),
        ("chapter", "Chapter"),
        ("dataset", "Dataset"),
        ("graphic", "ImageObject"),
        ("motion_picture", "Movie"),
        ("paper-conference", "ScholarlyArticle"),
        ("post-weblog", "BlogPosting"),
        ("report", "Report"),
        ("song", "AudioObject"),
        ("thesis", "Thesis"),
        ("webpage", "WebPage"),
        ("misc", "CreativeWork"),
    ],
    from_pivot: &[
        ("Article", "article"),
        ("AudioObject", "song"),
        ("Blog", "report"),
        ("BlogPosting", "post-weblog"),
        ("Book", "book"),
        ("Chapter", "chapter"),
        ("DataCatalog", "dataset"),
        ("Dataset", "dataset"),
        ("ImageObject", "graphic"),
        ("Movie", "motion_picture"),
        ("Report", "report"),
        ("ScholarlyArticle", "article-journal"),
        ("Thesis", "thesis"),
        ("VideoObject", "broadcast"),
        ("WebPage", "webpage"),
        ("WebSite", "webpage"),
    ],
};

static CITATION_TAG: VocabularyTable = VocabularyTable {
    fallback: "GEN",
    terms: &["ABST", "CHART", "MAP", "PAT", "UNPB"],
    to_pivot: &[
        ("BLOG", "BlogPosting"),
        ("BOOK", "Book"),
        ("CHAP", "Chapter"),
        ("COMP", "SoftwareSourceCode"),
        ("CONF", "ScholarlyArticle"),
        ("CTLG", "DataCatalog"),
        ("DATA", "Dataset"),
        ("ELEC", "WebPage"),
        ("FIGURE", "ImageObject"),
        ("GEN", "CreativeWork"),
        ("JOUR", "ScholarlyArticle"),
        ("MPCT", "Movie"),
        ("RPRT", "Report"),
        ("THES", "Thesis"),
        ("VIDEO", "VideoObject"),
    ],
    from_pivot: &[
        ("Book", "BOOK"),
        ("Chapter", "CHAP"),
        ("CreativeWork", "GEN"),
        ("DataCatalog", "CTLG"),
        ("Dataset", "DATA"),
        ("ImageObject", "FIGURE"),
        ("Movie", "MPCT"),
        ("Report", "RPRT"),
        ("ScholarlyArticle", "JOUR"),
        ("SoftwareSourceCode", "COMP"),
        ("Thesis", "THES"),
        ("VideoObject", "VIDEO"),
        ("WebPage", "ELEC"),
    ],
};

static RESOURCE_TYPE_GENERAL: VocabularyTable = VocabularyTable {
    fallback: "Other",
    terms: &[
        "InteractiveResource",
        "Model",
        "PhysicalObject",
        "Workflow",
        "DataPaper",
    ],
    to_pivot: &[
        ("Audiovisual", "VideoObject"),
        ("Collection", "Collection"),
        ("Dataset", "Dataset"),
        ("Event", "Event"),
        ("Image", "ImageObject"),
        ("Service", "Service"),
        ("Software", "SoftwareSourceCode"),
        ("Sound", "AudioObject"),
        ("Text", "ScholarlyArticle"),
        ("Other", "CreativeWork"),
    ],
    from_pivot: &[
        ("Article", "Text"),
        ("AudioObject", "Sound"),
        ("Blog", "Text"),
        ("BlogPosting", "Text"),
        ("Book", "Text"),
        ("Chapter", "Text"),
        ("Collection", "Collection"),
        ("CreativeWork", "Other"),
        ("DataCatalog", "Dataset"),
        ("Dataset", "Dataset"),
        ("Event", "Event"),
        ("ImageObject", "Image"),
        ("Movie", "Audiovisual"),
        ("PublicationIssue", "Text"),
        ("Report", "Text"),
        ("ScholarlyArticle", "Text"),
        ("Service", "Service"),
        ("SoftwareSourceCode", "Software"),
        ("Thesis", "Text"),
        ("VideoObject", "Audiovisual"),
        ("WebPage", "Text"),
        ("WebSite", "Text"),
    ],
};

static REGISTRY_WORK_TYPE: VocabularyTable = VocabularyTable {
    fallback: "other",
    terms: &["component", "journal", "peer-review", "standard"],
    to_pivot: &[
        ("book", "Book"),
        ("book-chapter", "Chapter"),
        ("dataset", "Dataset"),
        ("dissertation", "Thesis"),
        ("journal-article", "ScholarlyArticle"),
        ("journal-issue", "PublicationIssue"),
        ("posted-content", "ScholarlyArticle"),
        ("proceedings-article", "ScholarlyArticle"),
        ("report", "Report"),
        ("other", "CreativeWork"),
    ],
    from_pivot: &[
        ("Book", "book"),
        ("Chapter", "book-chapter"),
        ("Dataset", "dataset"),
        ("PublicationIssue", "journal-issue"),
        ("Report", "report"),
        ("ScholarlyArticle", "journal-article"),
        ("Thesis", "dissertation"),
    ],
};

fn lookup(pairs: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translates `term` from one vocabulary into another through the pivot.
///
/// A same-vocabulary translation keeps a recognized term. Any gap along the
/// way yields `to`'s fallback term; this function never fails.
pub fn translate(from: Vocabulary, to: Vocabulary, term: &str) -> &'static str {
    if from == to {
        return from.canonical(term).unwrap_or_else(|| to.fallback());
    }

    let pivot = if from == Vocabulary::PIVOT {
        Vocabulary::PIVOT.canonical(term)
    } else {
        lookup(from.table().to_pivot, term)
    };

    let translated = pivot.and_then(|pivot| {
        if to == Vocabulary::PIVOT {
            Some(pivot)
        } else {
            lookup(to.table().from_pivot, pivot)
        }
    });

    translated.unwrap_or_else(|| {
        tracing::trace!(%from, %to, term, "no crosswalk entry, using fallback");
        to.fallback()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Vocabulary::Bibliography, Vocabulary::LinkedData, "article", "ScholarlyArticle")]
    #[case(Vocabulary::LinkedData, Vocabulary::Bibliography, "BlogPosting", "article")]
    #[case(Vocabulary::LinkedData, Vocabulary::CitationStyle, "BlogPosting", "post-weblog")]
    #[case(Vocabulary::LinkedData, Vocabulary::CitationTag, "BlogPosting", "GEN")]
    #[case(Vocabulary::LinkedData, Vocabulary::ResourceTypeGeneral, "BlogPosting", "Text")]
    #[case(Vocabulary::LinkedData, Vocabulary::CitationTag, "Dataset", "DATA")]
    #[case(Vocabulary::ResourceTypeGeneral, Vocabulary::CitationStyle, "Software", "misc")]
    #[case(Vocabulary::CitationTag, Vocabulary::Bibliography, "JOUR", "article")]
    #[case(Vocabulary::RegistryWorkType, Vocabulary::CitationStyle, "journal-article", "article-journal")]
    #[case(Vocabulary::ResourceTypeGeneral, Vocabulary::RegistryWorkType, "Dataset", "dataset")]
    fn test_translate(
        #[case] from: Vocabulary,
        #[case] to: Vocabulary,
        #[case] term: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(translate(from, to, term), expected);
    }

    #[rstest]
    #[case(Vocabulary::LinkedData, "CreativeWork")]
    #[case(Vocabulary::Bibliography, "misc")]
    #[case(Vocabulary::CitationStyle, "misc")]
    #[case(Vocabulary::CitationTag, "GEN")]
    #[case(Vocabulary::ResourceTypeGeneral, "Other")]
    #[case(Vocabulary::RegistryWorkType, "other")]
    fn test_unmapped_terms_resolve_to_the_fallback(
        #[case] to: Vocabulary,
        #[case] fallback: &str,
    ) {
        assert_eq!(to.fallback(), fallback);
        for from in Vocabulary::ALL {
            assert_eq!(translate(from, to, "NoSuchTerm"), fallback);
            assert_eq!(translate(from, to, ""), fallback);
        }
    }

    #[test]
    fn test_same_vocabulary_keeps_recognized_terms() {
        assert_eq!(
            translate(Vocabulary::Bibliography, Vocabulary::Bibliography, "inproceedings"),
            "inproceedings"
        );
        assert_eq!(
            translate(Vocabulary::ResourceTypeGeneral, Vocabulary::ResourceTypeGeneral, "Workflow"),
            "Workflow"
        );
        assert_eq!(
            translate(Vocabulary::CitationTag, Vocabulary::CitationTag, "jour"),
            "GEN"
        );
    }

    #[test]
    fn test_every_pivot_target_is_a_pivot_term() {
        for vocabulary in Vocabulary::ALL {
            let table = vocabulary.table();
            for (_, pivot) in table.to_pivot {
                assert!(LINKED_DATA.terms.contains(pivot), "{vocabulary}: {pivot}");
            }
            for (pivot, _) in table.from_pivot {
                assert!(LINKED_DATA.terms.contains(pivot), "{vocabulary}: {pivot}");
            }
        }
    }

    #[test]
    fn test_translation_is_stable_under_repetition() {
        for &term in LINKED_DATA.terms {
            for a in Vocabulary::ALL {
                let in_a = translate(Vocabulary::PIVOT, a, term);
                assert!(a.contains(in_a));
                for b in Vocabulary::ALL {
                    let once = translate(a, b, in_a);
                    assert_eq!(translate(a, b, in_a), once);
                    assert_eq!(translate(b, b, once), once);
                    assert_eq!(translate(b, b, translate(b, b, once)), once);
                }
            }
        }
    }
}
