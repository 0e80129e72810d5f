//! Diagnostics collaborators.
//!
//! Schema validation and JSON linting live outside the core. A [`Converter`](crate::Converter)
//! asks them for messages and folds the messages into
//! [`Metadata::errors`](crate::Metadata::errors); they never abort a conversion.
//!
//! Both traits are implemented for plain closures:
//!
//! ```
//! use bibmeta::{JsonLinter, Validator};
//!
//! let linter = |json: &str| if json.contains("TODO") { vec!["placeholder".to_string()] } else { vec![] };
//! assert_eq!(linter.lint("{\"title\": \"TODO\"}"), vec!["placeholder"]);
//!
//! let validator = |_xml: &str, _schema: Option<&str>| Vec::<String>::new();
//! assert!(validator.validate("<resource/>", None).is_empty());
//! ```

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::HashSet;
use std::fmt;

/// Checks XML against the schema it claims to follow.
pub trait Validator {
    /// Returns one message per violation; empty means valid.
    fn validate(&self, xml: &str, schema_version: Option<&str>) -> Vec<String>;
}

impl<F> Validator for F
where
    F: Fn(&str, Option<&str>) -> Vec<String>,
{
    fn validate(&self, xml: &str, schema_version: Option<&str>) -> Vec<String> {
        self(xml, schema_version)
    }
}

/// Checks JSON text for syntax problems a lenient parser accepts.
pub trait JsonLinter {
    /// Returns one message per problem; empty means clean.
    fn lint(&self, json: &str) -> Vec<String>;
}

impl<F> JsonLinter for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn lint(&self, json: &str) -> Vec<String> {
        self(json)
    }
}

/// Reports syntax errors and keys defined twice in the same object.
///
/// ```
/// use bibmeta::{JsonLinter, StrictJsonLinter};
///
/// let messages = StrictJsonLinter.lint(r#"{"id": "a", "id": "b"}"#);
/// assert_eq!(messages, vec!["The same key is defined more than once: id"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJsonLinter;

impl JsonLinter for StrictJsonLinter {
    fn lint(&self, json: &str) -> Vec<String> {
        let mut messages = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let result = Checked(&mut messages)
            .deserialize(&mut deserializer)
            .and_then(|()| deserializer.end());
        if let Err(e) = result {
            messages.push(e.to_string());
        }
        messages
    }
}

/// Walks any JSON value, recording duplicate keys as it goes.
struct Checked<'a>(&'a mut Vec<String>);

impl<'de> DeserializeSeed<'de> for Checked<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Checked<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        Ok(())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        while seq.next_element_seed(Checked(&mut *self.0))?.is_some() {}
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                self.0
                    .push(format!("The same key is defined more than once: {key}"));
            }
            map.next_value_seed(Checked(&mut *self.0))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_json_has_no_messages() {
        assert!(StrictJsonLinter.lint(fixtures::DATACITE_JSON).is_empty());
        assert!(StrictJsonLinter.lint("[1, -2, 3.5, true, null, \"x\"]").is_empty());
    }

    #[test]
    fn test_overlapping_keys() {
        assert_eq!(
            StrictJsonLinter.lint(fixtures::DATACITE_JSON_OVERLAPPING_KEYS),
            vec!["The same key is defined more than once: id"]
        );
    }

    #[test]
    fn test_duplicates_are_scoped_per_object() {
        let json = r#"{"creator": [{"name": "a"}, {"name": "b"}], "nested": {"x": 1, "x": 2}}"#;
        assert_eq!(
            StrictJsonLinter.lint(json),
            vec!["The same key is defined more than once: x"]
        );
    }

    #[test]
    fn test_syntax_error_is_reported_with_position() {
        let messages = StrictJsonLinter.lint(fixtures::DATACITE_JSON_MISSING_COMMA);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("line 4"), "{}", messages[0]);

        let messages = StrictJsonLinter.lint("{} trailing");
        assert_eq!(messages.len(), 1);
    }
}
