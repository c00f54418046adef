//! Paper sizes and page margins, expressed in inches.
use crate::parsers::{parse_length, parse_paper_size, run_parser};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tabula_types::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
    /// Explicit dimensions in inches.
    Custom { width: f64, height: f64 },
}

impl PaperSize {
    /// Width and height in inches, portrait.
    pub fn dimensions_in(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0 / 25.4, 297.0 / 25.4),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Custom { width, height } => (*width, *height),
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        run_parser(parse_paper_size, s).map_err(|e| format!("Unknown paper size '{}': {}", s, e))
    }
}

impl Serialize for PaperSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PaperSize::A4 => serializer.serialize_str("a4"),
            PaperSize::Letter => serializer.serialize_str("letter"),
            PaperSize::Legal => serializer.serialize_str("legal"),
            PaperSize::Custom { width, height } => {
                serializer.collect_str(&format_args!("{}x{}in", width, height))
            }
        }
    }
}

impl<'de> Deserialize<'de> for PaperSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PaperSizeDef {
            Str(String),
            Map { width: f64, height: f64 },
        }

        match PaperSizeDef::deserialize(deserializer)? {
            PaperSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PaperSizeDef::Map { width, height } => Ok(PaperSize::Custom { width, height }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in inches.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(0.5)
    }
}

impl Margins {
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// The `[start, end]` margins along an axis: left/right for H,
    /// top/bottom for V.
    pub fn along(&self, axis: Axis) -> [f64; 2] {
        match axis {
            Axis::H => [self.left, self.right],
            Axis::V => [self.top, self.bottom],
        }
    }

    /// Parse margin shorthand (1, 2, or 4 lengths)
    fn parse_shorthand(input: &str) -> Result<Self, String> {
        let mut values = Vec::new();
        for part in input.split_whitespace() {
            values.push(run_parser(parse_length, part).map_err(|e| e.to_string())?);
        }

        match values.as_slice() {
            [all] => Ok(Margins::all(*all)),
            [v, h] => Ok(Margins {
                top: *v,
                right: *h,
                bottom: *v,
                left: *h,
            }),
            [top, right, bottom, left] => Ok(Margins {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(format!(
                "Invalid margin shorthand: expected 1, 2, or 4 values, got {}",
                values.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string like '0.5in' or '1in 20mm' or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Margins::parse_shorthand(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(value as f64))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => margins.top = map.next_value()?,
                        "right" => margins.right = map.next_value()?,
                        "bottom" => margins.bottom = map.next_value()?,
                        "left" => margins.left = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_shorthand() {
        let m: Margins = serde_json::from_str("\"1in 36pt\"").unwrap();
        assert_eq!(m.along(Axis::V), [1.0, 1.0]);
        assert_eq!(m.along(Axis::H), [0.5, 0.5]);
        let m: Margins = serde_json::from_str(r#"{"top": 2.0}"#).unwrap();
        assert_eq!(m.top, 2.0);
        assert_eq!(m.left, 0.5);
        assert!(serde_json::from_str::<Margins>("\"1 2 3\"").is_err());
    }

    #[test]
    fn paper_size_serde() {
        let p: PaperSize = serde_json::from_str("\"letter\"").unwrap();
        assert_eq!(p, PaperSize::Letter);
        assert_eq!(serde_json::to_string(&PaperSize::A4).unwrap(), "\"a4\"");
    }
}
