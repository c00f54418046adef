use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Options for delimited-text output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub separator: String,
    /// Quote character; `None` writes every field verbatim.
    #[serde(
        serialize_with = "serialize_quote",
        deserialize_with = "deserialize_quote"
    )]
    pub quote: Option<char>,
    /// Write table titles as `Table: <title>` lines.
    pub titles: bool,
    /// Write table captions as `Caption: <caption>` lines.
    pub captions: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            quote: Some('"'),
            titles: true,
            captions: true,
        }
    }
}

impl CsvOptions {
    pub fn tsv() -> Self {
        Self {
            separator: "\t".to_string(),
            ..Self::default()
        }
    }

    /// A field needs quoting if it holds a line break, a tab, the separator
    /// or the quote character.
    pub fn needs_quoting(&self, field: &str) -> bool {
        let Some(quote) = self.quote else {
            return false;
        };
        field.contains(['\n', '\r', '\t', quote])
            || (!self.separator.is_empty() && field.contains(self.separator.as_str()))
    }
}

fn serialize_quote<S: Serializer>(quote: &Option<char>, serializer: S) -> Result<S::Ok, S::Error> {
    match quote {
        Some(c) => serializer.collect_str(c),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_quote<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<char>, D::Error> {
    struct QuoteVisitor;

    impl<'de> Visitor<'de> for QuoteVisitor {
        type Value = Option<char>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a single character, or an empty string for no quoting")
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<Option<char>, E> {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (None, _) => Ok(None),
                (Some(c), None) => Ok(Some(c)),
                _ => Err(E::invalid_value(Unexpected::Str(s), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<char>, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(QuoteVisitor)
}
