//! RIS format tags and their definitions.
//!
//! This module defines the RIS tags the reader interprets and the writer emits.
//! See: http://en.wikipedia.org/wiki/RIS_(file_format)

/// RIS format tags.
///
/// RIS (Research Information Systems) is a standardized tag format developed by
/// Research Information Systems for expressing bibliographic citations.
#[allow(clippy::upper_case_acronyms)]
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum RisTag {
    /// TY - Type of reference
    Type,
    /// TI - Primary title
    Title,
    /// T1 - Primary title (alternative)
    TitleAlternative,
    /// AU - Author
    Author,
    /// A1 - Primary author
    AuthorPrimary,
    /// A2 - Secondary author (Editor, if any)
    AuthorSecondary,
    /// A3 - Tertiary author
    AuthorTertiary,
    /// A4 - Subsidiary author
    AuthorSubsidiary,
    /// ED - Editor
    Editor,
    /// JF - Journal/Periodical name: full format
    JournalFull,
    /// JO - Journal/Periodical name: full format (alternative)
    JournalFullAlternative,
    /// T2 - Secondary title (journal title alternative)
    SecondaryTitle,
    /// PY - Publication year
    PublicationYear,
    /// Y1 - Primary date
    DatePrimary,
    /// DA - Date
    Date,
    /// VL - Volume number
    Volume,
    /// IS - Issue number
    Issue,
    /// SP - Start page
    StartPage,
    /// EP - End page
    EndPage,
    /// DO - DOI
    Doi,
    /// AB - Abstract
    Abstract,
    /// N2 - Abstract (alternative)
    AbstractAlternative,
    /// KW - Keywords
    Keywords,
    /// SN - ISSN/ISBN
    SerialNumber,
    /// L1 - Link to PDF
    LinkPdf,
    /// UR - Web/URL
    Url,
    /// LA - Language
    Language,
    /// PB - Publisher
    Publisher,
    /// ET - Edition
    Edition,
    /// ER - End of reference
    EndOfReference,
    /// Unknown tag
    Unknown(String),
}

impl RisTag {
    /// Convert a string tag to a RisTag enum.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TY" => RisTag::Type,
            "TI" => RisTag::Title,
            "T1" => RisTag::TitleAlternative,
            "AU" => RisTag::Author,
            "A1" => RisTag::AuthorPrimary,
            "A2" => RisTag::AuthorSecondary,
            "A3" => RisTag::AuthorTertiary,
            "A4" => RisTag::AuthorSubsidiary,
            "ED" => RisTag::Editor,
            "JF" => RisTag::JournalFull,
            "JO" => RisTag::JournalFullAlternative,
            "T2" => RisTag::SecondaryTitle,
            "PY" => RisTag::PublicationYear,
            "Y1" => RisTag::DatePrimary,
            "DA" => RisTag::Date,
            "VL" => RisTag::Volume,
            "IS" => RisTag::Issue,
            "SP" => RisTag::StartPage,
            "EP" => RisTag::EndPage,
            "DO" => RisTag::Doi,
            "AB" => RisTag::Abstract,
            "N2" => RisTag::AbstractAlternative,
            "KW" => RisTag::Keywords,
            "SN" => RisTag::SerialNumber,
            "L1" => RisTag::LinkPdf,
            "UR" => RisTag::Url,
            "LA" => RisTag::Language,
            "PB" => RisTag::Publisher,
            "ET" => RisTag::Edition,
            "ER" => RisTag::EndOfReference,
            _ => RisTag::Unknown(tag.to_string()),
        }
    }

    /// Convert a RisTag enum back to its string representation.
    pub fn as_tag(&self) -> &str {
        match self {
            RisTag::Type => "TY",
            RisTag::Title => "TI",
            RisTag::TitleAlternative => "T1",
            RisTag::Author => "AU",
            RisTag::AuthorPrimary => "A1",
            RisTag::AuthorSecondary => "A2",
            RisTag::AuthorTertiary => "A3",
            RisTag::AuthorSubsidiary => "A4",
            RisTag::Editor => "ED",
            RisTag::JournalFull => "JF",
            RisTag::JournalFullAlternative => "JO",
            RisTag::SecondaryTitle => "T2",
            RisTag::PublicationYear => "PY",
            RisTag::DatePrimary => "Y1",
            RisTag::Date => "DA",
            RisTag::Volume => "VL",
            RisTag::Issue => "IS",
            RisTag::StartPage => "SP",
            RisTag::EndPage => "EP",
            RisTag::Doi => "DO",
            RisTag::Abstract => "AB",
            RisTag::AbstractAlternative => "N2",
            RisTag::Keywords => "KW",
            RisTag::SerialNumber => "SN",
            RisTag::LinkPdf => "L1",
            RisTag::Url => "UR",
            RisTag::Language => "LA",
            RisTag::Publisher => "PB",
            RisTag::Edition => "ET",
            RisTag::EndOfReference => "ER",
            RisTag::Unknown(tag) => tag,
        }
    }

    /// Check if this tag names a creator of the work.
    pub fn is_author_tag(&self) -> bool {
        matches!(self, RisTag::Author | RisTag::AuthorPrimary)
    }

    /// Contributor role for secondary name tags.
    pub fn contributor_role(&self) -> Option<&'static str> {
        match self {
            RisTag::AuthorSecondary | RisTag::Editor => Some("Editor"),
            RisTag::AuthorTertiary | RisTag::AuthorSubsidiary => Some("Other"),
            _ => None,
        }
    }

    /// Get the priority of this tag for journal name selection.
    /// Lower numbers have higher priority.
    ///
    /// Priority order:
    /// 1. JF (Journal Full) - primary full journal name
    /// 2. T2 (Secondary Title) - alternative journal title
    /// 3. JO (Journal Full Alternative) - alternative full name
    pub fn journal_priority(&self) -> Option<u8> {
        match self {
            RisTag::JournalFull => Some(1),
            RisTag::SecondaryTitle => Some(2),
            RisTag::JournalFullAlternative => Some(3),
            _ => None,
        }
    }
}
