//! RIS rendering.

use crate::crosswalk::Vocabulary;
use crate::identifier::normalize_url;
use crate::metadata::{DateType, Metadata};
use crate::ris::tags::RisTag;
use crate::utils::date_parts;

/// Renders one record, `TY` first and `ER` last.
pub(crate) fn ris_write(metadata: &Metadata) -> String {
    let mut lines: Vec<(RisTag, String)> = Vec::new();
    let mut push = |tag: RisTag, value: Option<&str>| {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            // one value per line
            lines.push((tag, value.replace(['\r', '\n'], " ")));
        }
    };

    push(RisTag::Type, Some(metadata.type_in(Vocabulary::CitationTag)));
    push(RisTag::TitleAlternative, metadata.title());
    let periodical = metadata.periodical.as_ref();
    push(RisTag::SecondaryTitle, periodical.and_then(|p| p.title.as_deref()));
    for creator in &metadata.creators {
        push(RisTag::Author, Some(&creator.sort_name()));
    }
    for contributor in &metadata.contributors {
        if contributor.contributor_type.as_deref() == Some("Editor") {
            push(RisTag::Editor, Some(&contributor.sort_name()));
        }
    }

    let doi = metadata.doi.clone().or_else(|| metadata.doi_name());
    push(RisTag::Doi, doi.as_deref());
    // without a DOI the identifier is carried by the first link
    let identifier_url = metadata
        .identifier
        .as_deref()
        .filter(|_| doi.is_none())
        .filter(|id| metadata.url.as_deref().and_then(normalize_url).as_deref() != Some(*id));
    push(RisTag::Url, identifier_url);
    push(RisTag::Url, metadata.url.as_deref());
    for content_url in &metadata.content_url {
        push(RisTag::LinkPdf, Some(content_url));
    }

    push(RisTag::Abstract, metadata.abstract_text());
    for subject in &metadata.subjects {
        push(RisTag::Keywords, Some(&subject.subject));
    }
    push(RisTag::PublicationYear, metadata.year());
    let issued = metadata.date_of(DateType::Issued).map(date_parts);
    let slash_date = issued
        .filter(|parts| parts.len() > 1)
        .map(|parts| {
            parts
                .iter()
                .map(|p| format!("{p:02}"))
                .collect::<Vec<_>>()
                .join("/")
        });
    push(RisTag::Date, slash_date.as_deref());
    push(RisTag::Publisher, metadata.publisher.as_deref());
    push(RisTag::Language, metadata.language.as_deref());
    push(RisTag::Edition, metadata.version.as_deref());
    push(RisTag::Volume, periodical.and_then(|p| p.volume.as_deref()));
    push(RisTag::Issue, periodical.and_then(|p| p.issue.as_deref()));
    push(RisTag::StartPage, periodical.and_then(|p| p.first_page.as_deref()));
    push(RisTag::EndPage, periodical.and_then(|p| p.last_page.as_deref()));
    push(RisTag::SerialNumber, periodical.and_then(|p| p.issn.as_deref()));

    let mut output: String = lines
        .iter()
        .map(|(tag, value)| format!("{}  - {value}\n", tag.as_tag()))
        .collect();
    output.push_str("ER  - \n");
    output
}
