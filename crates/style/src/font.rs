use crate::area::FontStyle;
use crate::parsers::{parse_font_description, run_parser, StyleParseError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A font request handed to the text measurement service.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescription {
    pub family: String,
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            family: "Sans Serif".to_string(),
            size_pt: 10.0,
            bold: false,
            italic: false,
        }
    }
}

impl FontDescription {
    pub fn parse(s: &str) -> Result<Self, StyleParseError> {
        run_parser(parse_font_description, s)
    }

    /// Parses `s`, falling back to the default font with a warning when it
    /// cannot be understood.
    pub fn parse_or_default(s: &str) -> Self {
        match Self::parse(s) {
            Ok(font) => font,
            Err(e) => {
                log::warn!("\"{}\": bad font specification ({}); using default font", s, e);
                Self::default()
            }
        }
    }

    /// Applies a cell's font overrides on top of this base font.
    pub fn with_overrides(&self, style: &FontStyle) -> FontDescription {
        FontDescription {
            family: style.typeface.clone().unwrap_or_else(|| self.family.clone()),
            size_pt: if style.size > 0 {
                style.size as f64
            } else {
                self.size_pt
            },
            bold: self.bold || style.bold,
            italic: self.italic || style.italic,
        }
    }
}

impl fmt::Display for FontDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if self.bold {
            write!(f, " Bold")?;
        }
        if self.italic {
            write!(f, " Italic")?;
        }
        write!(f, " {}", self.size_pt)
    }
}

impl Serialize for FontDescription {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FontDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_font_falls_back_to_default() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(FontDescription::parse_or_default("Bold"), FontDescription::default());
        assert_eq!(FontDescription::parse_or_default("Serif 12").family, "Serif");
    }

    #[test]
    fn cell_overrides() {
        let base = FontDescription::default();
        let style = FontStyle {
            bold: true,
            size: 14,
            typeface: Some("Serif".into()),
            ..FontStyle::default()
        };
        let font = base.with_overrides(&style);
        assert_eq!(font.family, "Serif");
        assert_eq!(font.size_pt, 14.0);
        assert!(font.bold);
        assert_eq!(font.to_string(), "Serif Bold 14");
    }
}
