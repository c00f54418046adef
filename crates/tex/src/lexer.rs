use crate::LexError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{alpha1, anychar, char},
    combinator::{opt, recognize},
    sequence::{pair, preceded},
};

/// TeX category codes, plus the control sequences built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Escape = 0,
    BeginGroup = 1,
    EndGroup = 2,
    MathShift = 3,
    Alignment = 4,
    EndOfLine = 5,
    Parameter = 6,
    Superscript = 7,
    Subscript = 8,
    Ignored = 9,
    Space = 10,
    Letter = 11,
    Other = 12,
    Active = 13,
    Comment = 14,
    Invalid = 15,
    ControlSequence = 16,
}

impl Category {
    /// The plain TeX category of `c`.
    pub fn of(c: char) -> Self {
        match c {
            '\\' => Category::Escape,
            '{' => Category::BeginGroup,
            '}' => Category::EndGroup,
            '$' => Category::MathShift,
            '&' => Category::Alignment,
            '\n' | '\r' => Category::EndOfLine,
            '#' => Category::Parameter,
            '^' => Category::Superscript,
            '_' => Category::Subscript,
            '\0' => Category::Ignored,
            ' ' | '\t' => Category::Space,
            '~' => Category::Active,
            '%' => Category::Comment,
            '\x7f' => Category::Invalid,
            c if c.is_ascii_alphabetic() => Category::Letter,
            _ => Category::Other,
        }
    }
}

/// One token of source text.
///
/// Control sequences keep their backslash and take every letter after it.
/// Spaces come in runs; every other category is one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub category: Category,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// The name of a control sequence without its backslash.
    pub fn control_name(&self) -> Option<&'a str> {
        match self.category {
            Category::ControlSequence => self.text.strip_prefix('\\'),
            _ => None,
        }
    }
}

/// Splits a TeX fragment into tokens. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    rest: &'a str,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            failed: false,
        }
    }
}

/// Collects every token of `input`.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}

fn control_sequence(input: &str) -> IResult<&str, &str> {
    recognize(preceded(char('\\'), alt((alpha1, recognize(anychar))))).parse(input)
}

/// `%` through the end of the line, newline included.
fn comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        preceded(char('%'), take_till(|c| c == '\n')),
        opt(char('\n')),
    ))
    .parse(input)
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(|c| Category::of(c) == Category::Space).parse(input)
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let first = self.rest.chars().next()?;
        let category = Category::of(first);
        let parsed = match category {
            Category::Escape => control_sequence(self.rest),
            Category::Comment => comment(self.rest),
            Category::Space => spaces(self.rest),
            _ => {
                let (head, tail) = self.rest.split_at(first.len_utf8());
                Ok((tail, head))
            }
        };
        let Ok((rest, text)) = parsed else {
            log::debug!("unterminated control sequence at end of {:?}", self.rest);
            self.failed = true;
            return Some(Err(LexError::TrailingEscape));
        };
        self.rest = rest;
        let category = match category {
            Category::Escape => Category::ControlSequence,
            other => other,
        };
        Some(Ok(Token { category, text }))
    }
}
