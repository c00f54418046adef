//! Low-level nom parsers for page and font option values.
//!
//! Lengths parse to inches, since page setup is expressed in inches before
//! being scaled to layout units.

use crate::dimension::PaperSize;
use crate::font::FontDescription;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0, space1},
    combinator::{map, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

// --- Helper Parsers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a unit suffix and returns how many inches one unit is.
fn parse_unit(input: &str) -> IResult<&str, f64> {
    alt((
        map(tag_no_case("in"), |_| 1.0),
        map(tag_no_case("pt"), |_| 1.0 / 72.0),
        map(tag_no_case("px"), |_| 1.0 / 96.0),
        map(tag_no_case("mm"), |_| 1.0 / 25.4),
        map(tag_no_case("cm"), |_| 1.0 / 2.54),
    ))
    .parse(input)
}

/// Parses a length such as `0.5in`, `12pt` or `20mm`, in inches.
///
/// A bare number is taken to be in inches.
pub fn parse_length(input: &str) -> IResult<&str, f64> {
    let (input, value) = double(input)?;
    let (input, unit) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit.unwrap_or(1.0)))
}

/// Parses `WxH` with one trailing unit applying to both numbers, e.g.
/// `210x297mm`.
fn custom_paper(input: &str) -> IResult<&str, PaperSize> {
    let (input, width) = ws(double).parse(input)?;
    let (input, _) = alt((char('x'), char('X'))).parse(input)?;
    let (input, height) = ws(double).parse(input)?;
    let (input, unit) = opt(parse_unit).parse(input)?;
    let unit = unit.unwrap_or(1.0);
    Ok((
        input,
        PaperSize::Custom {
            width: width * unit,
            height: height * unit,
        },
    ))
}

/// Parses a paper size name or explicit dimensions.
pub fn parse_paper_size(input: &str) -> IResult<&str, PaperSize> {
    alt((
        map(tag_no_case("a4"), |_| PaperSize::A4),
        map(tag_no_case("letter"), |_| PaperSize::Letter),
        map(tag_no_case("legal"), |_| PaperSize::Legal),
        custom_paper,
    ))
    .parse(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

/// Parses a font description such as `Sans Serif Bold Italic 10`.
///
/// The family is every leading word that is neither a style keyword nor the
/// trailing point size.
pub fn parse_font_description(input: &str) -> IResult<&str, FontDescription> {
    let (rest, words) = separated_list1(space1, word).parse(input)?;
    let mut words = words.as_slice();

    let mut size_pt = None;
    if let Some((last, init)) = words.split_last()
        && let Ok(size) = last.parse::<f64>()
    {
        size_pt = Some(size);
        words = init;
    }

    let mut bold = false;
    let mut italic = false;
    while let Some((last, init)) = words.split_last() {
        match last.to_ascii_lowercase().as_str() {
            "bold" => bold = true,
            "italic" | "oblique" => italic = true,
            _ => break,
        }
        words = init;
    }

    if words.is_empty() || size_pt.is_some_and(|size| size <= 0.0) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let mut family = words.join(" ");
    if family.eq_ignore_ascii_case("monospaced") {
        family = "Monospace".to_string();
    }
    let default = FontDescription::default();
    Ok((
        rest,
        FontDescription {
            family,
            size_pt: size_pt.unwrap_or(default.size_pt),
            bold,
            italic,
        },
    ))
}

/// Runs a nom parser over the whole input and converts its result to a
/// `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, StyleParseError>
where
    P: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_convert_to_inches() {
        assert_eq!(run_parser(parse_length, "0.5in"), Ok(0.5));
        assert_eq!(run_parser(parse_length, "72pt"), Ok(1.0));
        assert_eq!(run_parser(parse_length, "2"), Ok(2.0));
        let mm = run_parser(parse_length, "25.4mm").unwrap();
        assert!((mm - 1.0).abs() < 1e-9);
        assert!(run_parser(parse_length, "ten").is_err());
    }

    #[test]
    fn paper_sizes() {
        assert_eq!(run_parser(parse_paper_size, "A4"), Ok(PaperSize::A4));
        assert_eq!(
            run_parser(parse_paper_size, "8.5x11in"),
            Ok(PaperSize::Custom { width: 8.5, height: 11.0 })
        );
        let PaperSize::Custom { width, height } = run_parser(parse_paper_size, "210x297mm").unwrap()
        else {
            panic!("expected custom size");
        };
        assert!((width - 8.2677).abs() < 1e-3);
        assert!((height - 11.6929).abs() < 1e-3);
    }

    #[test]
    fn font_descriptions() {
        let font = run_parser(parse_font_description, "Sans Serif Bold 12").unwrap();
        assert_eq!(font.family, "Sans Serif");
        assert!(font.bold);
        assert!(!font.italic);
        assert_eq!(font.size_pt, 12.0);

        let font = run_parser(parse_font_description, "Monospaced").unwrap();
        assert_eq!(font.family, "Monospace");
        assert_eq!(font.size_pt, 10.0);

        assert!(run_parser(parse_font_description, "Bold 12").is_err());
        assert!(run_parser(parse_font_description, "Serif 0").is_err());
    }
}
