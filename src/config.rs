//! Driver configuration: which driver, where it writes, and its options.

use crate::error::OutputError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tabula_style::{PageSetup, StyleOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    /// One JSON document per laid-out page.
    Pages,
    /// One JSON record per archive writer call.
    Archive,
}

impl OutputFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "tsv" | "tab" => Some(OutputFormat::Tsv),
            "json" => Some(OutputFormat::Pages),
            "jsonl" => Some(OutputFormat::Archive),
            _ => None,
        }
    }
}

/// One output driver to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    pub format: OutputFormat,
    pub path: PathBuf,
    /// Driver options, deserialized into the driver's option struct.
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl DriverConfig {
    /// Builds a config for `path`, taking the format from `format` or the
    /// file extension and the options from `key=value` pairs.
    pub fn new(
        path: impl Into<PathBuf>,
        format: Option<OutputFormat>,
        pairs: &[String],
    ) -> Result<Self, OutputError> {
        let path = path.into();
        let format = match format.or_else(|| OutputFormat::from_path(&path)) {
            Some(format) => format,
            None => {
                return Err(OutputError::Config(format!(
                    "cannot tell the output format of {}",
                    path.display()
                )));
            }
        };
        Ok(Self {
            format,
            path,
            options: fold_pairs(pairs)?,
        })
    }

    /// Deserializes the options into `T`.
    pub fn options<T: DeserializeOwned>(&self) -> Result<T, OutputError> {
        Ok(serde_json::from_value(Value::Object(self.options.clone()))?)
    }
}

/// Options of the paginating drivers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagedOptions {
    #[serde(flatten)]
    pub style: StyleOptions,
    #[serde(flatten)]
    pub setup: PageSetup,
    /// Value of the `&[Title]` heading variable.
    pub title: Option<String>,
    pub pretty: bool,
}

/// Folds `key=value` pairs into a JSON object.
///
/// Dotted keys nest (`margins.top=1in`). Values that parse as JSON keep
/// their type; anything else is a string.
pub fn fold_pairs(pairs: &[String]) -> Result<Map<String, Value>, OutputError> {
    let mut root = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(OutputError::Config(format!("expected key=value, got {pair:?}")));
        };
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::Null)) => value,
            _ => Value::String(raw.to_string()),
        };

        let mut parts = key.trim().split('.').peekable();
        let mut node = &mut root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(OutputError::Config(format!("empty key in {pair:?}")));
            }
            if parts.peek().is_none() {
                if node.insert(part.to_string(), value.clone()).is_some() {
                    log::warn!("option {key} given twice; keeping the last value");
                }
                break;
            }
            let child = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child {
                Value::Object(map) => map,
                _ => return Err(OutputError::Config(format!("{part} is not an object in {pair:?}"))),
            };
        }
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_csv::CsvOptions;
    use tabula_style::{Orientation, PaperSize};

    fn pairs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_fold_into_typed_json() {
        let map = fold_pairs(&pairs(&["titles=false", "separator=;", "margins.top=1"])).unwrap();
        assert_eq!(map["titles"], Value::Bool(false));
        assert_eq!(map["separator"], Value::String(";".into()));
        assert_eq!(map["margins"]["top"], serde_json::json!(1));
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(fold_pairs(&pairs(&["novalue"])).is_err());
        assert!(fold_pairs(&pairs(&["a=1", "a.b=2"])).is_err());
        assert!(fold_pairs(&pairs(&["a..b=2"])).is_err());
    }

    #[test]
    fn csv_options_from_pairs() {
        let config = DriverConfig::new("out.csv", None, &pairs(&["quote=", "captions=false"])).unwrap();
        assert_eq!(config.format, OutputFormat::Csv);
        let options: CsvOptions = config.options().unwrap();
        assert_eq!(options.quote, None);
        assert!(!options.captions);
        assert!(options.titles);
    }

    #[test]
    fn paged_options_from_pairs() {
        let config = DriverConfig::new(
            "pages.json",
            None,
            &pairs(&["paper=letter", "orientation=landscape", "outline=true", "title=Report"]),
        )
        .unwrap();
        assert_eq!(config.format, OutputFormat::Pages);
        let options: PagedOptions = config.options().unwrap();
        assert_eq!(options.setup.paper, PaperSize::Letter);
        assert_eq!(options.setup.orientation, Orientation::Landscape);
        assert!(options.style.outline);
        assert_eq!(options.title.as_deref(), Some("Report"));
    }

    #[test]
    fn unknown_extension_needs_a_format() {
        assert!(DriverConfig::new("out.bin", None, &[]).is_err());
        let config = DriverConfig::new("out.bin", Some(OutputFormat::Archive), &[]).unwrap();
        assert_eq!(config.format, OutputFormat::Archive);
    }
}
