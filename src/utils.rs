use crate::metadata::{Agent, AgentKind};
use crate::regex::Regex;
use once_cell::sync::Lazy;

static ISO_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{1,2}))?(?:-(\d{1,2}))?").unwrap());

/// Trims `value`, mapping blank strings to `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Formats page numbers consistently, completing partial end pages.
///
/// # Arguments
///
/// * `page_range` - The page string to format
pub(crate) fn format_page_numbers(page_range: &str) -> String {
    let Some((from, to)) = page_range.split_once('-') else {
        return page_range.to_string();
    };
    if to.contains('-') {
        return page_range.to_string();
    }

    let (from_prefix, from_num) = split_prefix_and_number(from);
    let (to_prefix, to_num) = split_prefix_and_number(to);

    if from_prefix != to_prefix && !from_prefix.is_empty() && !to_prefix.is_empty() {
        return page_range.to_string();
    }

    let (Some(from_num), Some(to_num)) = (from_num, to_num) else {
        return page_range.to_string();
    };

    // "1234-45" means 1234-1245
    let completed_to = if to_num.len() < from_num.len() {
        format!("{}{}", &from_num[..from_num.len() - to_num.len()], to_num)
    } else {
        to_num.to_string()
    };

    if from_num == completed_to {
        return format!("{from_prefix}{from_num}");
    }

    format!("{from_prefix}{from_num}-{from_prefix}{completed_to}")
}

/// Splits a page number into its prefix and numeric part.
fn split_prefix_and_number(input: &str) -> (&str, Option<&str>) {
    match input.find(|c: char| c.is_ascii_digit()) {
        Some(index) if input[index..].chars().all(|c| c.is_ascii_digit()) => {
            (&input[..index], Some(&input[index..]))
        }
        _ => (input, None),
    }
}

/// Splits "Family, Given" on the first comma.
///
/// Returns `None` when the name has no comma.
pub(crate) fn parse_author_name(name: &str) -> Option<(String, String)> {
    let (family, given) = name.split_once(',')?;
    Some((family.trim().to_string(), given.trim().to_string()))
}

/// Builds an agent from a single display-name string.
///
/// A "Family, Given" name becomes a person whose `name` keeps the literal
/// string; anything else stays an unstructured name of unknown kind.
pub(crate) fn agent_from_name(name: &str) -> Agent {
    let name = name.trim();
    match parse_author_name(name) {
        Some((family, given)) if !family.is_empty() => Agent {
            kind: Some(AgentKind::Person),
            name: name.to_string(),
            given_name: (!given.is_empty()).then_some(given),
            family_name: Some(family),
            ..Agent::default()
        },
        _ => Agent {
            name: name.to_string(),
            ..Agent::default()
        },
    }
}

/// Splits a comma-separated keyword list.
pub(crate) fn split_keywords(keywords: &str) -> Vec<String> {
    keywords.split(',').filter_map(non_blank).collect()
}

/// ISO 8601 date from CSL-style date parts, e.g. `[2016, 12, 20]`.
pub(crate) fn date_from_parts(parts: &[i64]) -> Option<String> {
    match parts {
        [year, month, day, ..] => Some(format!("{year:04}-{month:02}-{day:02}")),
        [year, month] => Some(format!("{year:04}-{month:02}")),
        [year] => Some(format!("{year:04}")),
        [] => None,
    }
}

/// CSL-style date parts from the leading `YYYY[-MM[-DD]]` of an ISO date.
pub(crate) fn date_parts(date: &str) -> Vec<i64> {
    ISO_DATE_REGEX
        .captures(date.trim())
        .map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .filter_map(|m| m.as_str().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// ISO date from a slash-separated `YYYY/MM/DD/other` date.
///
/// Missing or non-numeric parts end the date early.
pub(crate) fn parse_slash_date(date: &str) -> Option<String> {
    let mut parts = date.trim().split('/');
    let year = parts
        .next()
        .map(str::trim)
        .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))?
        .parse::<i64>()
        .ok()?;
    let month = parts
        .next()
        .and_then(|m| m.trim().parse::<i64>().ok())
        .filter(|m| (1..=12).contains(m));
    let day = month.and_then(|_| {
        parts
            .next()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .filter(|d| (1..=31).contains(d))
    });
    let parts: Vec<i64> = [Some(year), month, day].into_iter().flatten().collect();
    date_from_parts(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_format_page_numbers() {
        assert_eq!(format_page_numbers("1234-45"), "1234-1245");
        assert_eq!(format_page_numbers("1234"), "1234");
        assert_eq!(format_page_numbers("123-456"), "123-456");
        assert_eq!(format_page_numbers("e071674"), "e071674");
        assert_eq!(format_page_numbers("R575-82"), "R575-R582");
        assert_eq!(format_page_numbers("12-345"), "12-345");
        assert_eq!(format_page_numbers("5-10"), "5-10");
        assert_eq!(format_page_numbers("A94-A95"), "A94-A95");
        assert_eq!(format_page_numbers("01-Apr"), "01-Apr");
        assert_eq!(format_page_numbers("iii613-iii614"), "iii613-iii614");
        assert_eq!(format_page_numbers("101-101"), "101");
    }

    #[test]
    fn test_agent_from_name() {
        let agent = agent_from_name("Johansson, Emma");
        assert_eq!(agent.kind, Some(AgentKind::Person));
        assert_eq!(agent.name, "Johansson, Emma");
        assert_eq!(agent.family_name.as_deref(), Some("Johansson"));
        assert_eq!(agent.given_name.as_deref(), Some("Emma"));

        let agent = agent_from_name("Smith-Jones, John-Paul, Jr.");
        assert_eq!(agent.family_name.as_deref(), Some("Smith-Jones"));
        assert_eq!(agent.given_name.as_deref(), Some("John-Paul, Jr."));

        let agent = agent_from_name("The GTEx Consortium");
        assert_eq!(agent.kind, None);
        assert_eq!(agent.name, "The GTEx Consortium");
        assert_eq!(agent.family_name, None);
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(
            split_keywords("datacite, doi, metadata, featured"),
            vec!["datacite", "doi", "metadata", "featured"]
        );
        assert!(split_keywords(" , ").is_empty());
    }

    #[rstest]
    #[case(&[2016, 12, 20], Some("2016-12-20"))]
    #[case(&[2014, 2], Some("2014-02"))]
    #[case(&[2013], Some("2013"))]
    #[case(&[], None)]
    fn test_date_from_parts(#[case] parts: &[i64], #[case] expected: Option<&str>) {
        assert_eq!(date_from_parts(parts).as_deref(), expected);
    }

    #[rstest]
    #[case("2016-12-20", vec![2016, 12, 20])]
    #[case("2017-11-30T12:00:00Z", vec![2017, 11, 30])]
    #[case("2013", vec![2013])]
    #[case("n.d.", vec![])]
    fn test_date_parts(#[case] date: &str, #[case] expected: Vec<i64>) {
        assert_eq!(date_parts(date), expected);
    }

    #[rstest]
    #[case("2023/12/25/Christmas edition", Some("2023-12-25"))]
    #[case("1998///", Some("1998"))]
    #[case("1999", Some("1999"))]
    #[case("2014/02/", Some("2014-02"))]
    #[case("spring", None)]
    fn test_parse_slash_date(#[case] date: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_slash_date(date).as_deref(), expected);
    }
}
