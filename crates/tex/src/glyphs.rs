//! Glyph tables in both directions: TeX control sequences to Unicode for
//! labels, and Unicode to TeX for text written into TeX documents.

use crate::LexError;
use crate::lexer::{Category, Lexer, Token};

/// Control sequences that name a single glyph.
const GLYPHS: &[(&str, char)] = &[
    ("Alpha", 'Α'),
    ("Beta", 'Β'),
    ("Gamma", 'Γ'),
    ("Delta", 'Δ'),
    ("Epsilon", 'Ε'),
    ("Zeta", 'Ζ'),
    ("Eta", 'Η'),
    ("Theta", 'Θ'),
    ("Iota", 'Ι'),
    ("Kappa", 'Κ'),
    ("Lambda", 'Λ'),
    ("Mu", 'Μ'),
    ("Nu", 'Ν'),
    ("Xi", 'Ξ'),
    ("Omicron", 'Ο'),
    ("Pi", 'Π'),
    ("Rho", 'Ρ'),
    ("Sigma", 'Σ'),
    ("Tau", 'Τ'),
    ("Upsilon", 'Υ'),
    ("Phi", 'Φ'),
    ("Chi", 'Χ'),
    ("Psi", 'Ψ'),
    ("Omega", 'Ω'),
    ("alpha", 'α'),
    ("beta", 'β'),
    ("gamma", 'γ'),
    ("delta", 'δ'),
    ("epsilon", 'ε'),
    ("zeta", 'ζ'),
    ("eta", 'η'),
    ("theta", 'θ'),
    ("iota", 'ι'),
    ("kappa", 'κ'),
    ("lambda", 'λ'),
    ("mu", 'μ'),
    ("nu", 'ν'),
    ("xi", 'ξ'),
    ("omicron", 'ο'),
    ("pi", 'π'),
    ("rho", 'ρ'),
    ("varsigma", 'ς'),
    ("sigma", 'σ'),
    ("tau", 'τ'),
    ("upsilon", 'υ'),
    ("phi", 'φ'),
    ("chi", 'χ'),
    ("psi", 'ψ'),
    ("omega", 'ω'),
    ("pm", '±'),
    ("mp", '∓'),
    ("times", '×'),
    ("div", '÷'),
    ("cdot", '·'),
    ("circ", '°'),
    ("neg", '¬'),
    ("infty", '∞'),
    ("partial", '∂'),
    ("nabla", '∇'),
    ("sum", '∑'),
    ("prod", '∏'),
    ("int", '∫'),
    ("sqrt", '√'),
    ("le", '≤'),
    ("leq", '≤'),
    ("ge", '≥'),
    ("geq", '≥'),
    ("ne", '≠'),
    ("neq", '≠'),
    ("approx", '≈'),
    ("equiv", '≡'),
    ("sim", '∼'),
    ("propto", '∝'),
    ("in", '∈'),
    ("cap", '∩'),
    ("cup", '∪'),
    ("forall", '∀'),
    ("exists", '∃'),
    ("leftarrow", '←'),
    ("rightarrow", '→'),
    ("to", '→'),
    ("S", '§'),
    ("P", '¶'),
    ("copyright", '©'),
    ("backslash", '\\'),
];

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// The glyph a control sequence name stands for.
pub fn glyph(name: &str) -> Option<char> {
    GLYPHS.iter().find(|(n, _)| *n == name).map(|&(_, c)| c)
}

fn script(digits: &[char; 10], c: char) -> Option<char> {
    c.to_digit(10).map(|d| digits[d as usize])
}

/// Renders a TeX fragment as plain text.
///
/// Known control sequences become their glyphs; control symbols such as
/// `\%` become the character itself; digits after `^` or `_` become
/// superscript or subscript digits. Grouping braces, math shifts and
/// comments are dropped. A space right after a control word is dropped,
/// as TeX does.
pub fn transliterate(input: &str) -> Result<String, LexError> {
    let mut out = String::with_capacity(input.len());
    let mut lexer = Lexer::new(input);
    let mut after_word = false;
    while let Some(token) = lexer.next() {
        let token = token?;
        let skip_space = std::mem::take(&mut after_word);
        match token.category {
            Category::ControlSequence => {
                let name = token.control_name().unwrap_or_default();
                let is_word = name.chars().all(|c| c.is_ascii_alphabetic());
                match glyph(name) {
                    Some(c) => out.push(c),
                    None if !is_word => out.push_str(name),
                    None => {
                        log::debug!("no glyph for \\{name}; keeping its name");
                        out.push_str(name);
                    }
                }
                after_word = is_word;
            }
            Category::Superscript | Category::Subscript => {
                let digits = if token.category == Category::Superscript {
                    &SUPERSCRIPT_DIGITS
                } else {
                    &SUBSCRIPT_DIGITS
                };
                script_argument(&mut lexer, digits, &mut out)?;
            }
            Category::BeginGroup
            | Category::EndGroup
            | Category::MathShift
            | Category::Comment
            | Category::Ignored
            | Category::Invalid => {}
            Category::Space if skip_space => {}
            Category::EndOfLine => out.push(' '),
            Category::Active => out.push('\u{a0}'),
            _ => out.push_str(token.text),
        }
    }
    Ok(out)
}

/// Consumes the argument of `^` or `_`: a braced group, or the next
/// character. Digits are converted; anything else is kept as is.
fn script_argument<'a, I>(
    lexer: &mut I,
    digits: &[char; 10],
    out: &mut String,
) -> Result<(), LexError>
where
    I: Iterator<Item = Result<Token<'a>, LexError>>,
{
    let Some(next) = lexer.next() else {
        return Ok(());
    };
    let next = next?;
    let convert = |text: &str, out: &mut String| {
        out.extend(text.chars().map(|c| script(digits, c).unwrap_or(c)));
    };
    match next.category {
        Category::BeginGroup => {
            for token in lexer.by_ref() {
                let token = token?;
                if token.category == Category::EndGroup {
                    break;
                }
                match token.control_name() {
                    Some(name) => out.push(glyph(name).unwrap_or('?')),
                    None => convert(token.text, out),
                }
            }
        }
        Category::Letter | Category::Other => convert(next.text, out),
        Category::ControlSequence => {
            let name = next.control_name().unwrap_or_default();
            match glyph(name) {
                Some(c) => out.push(c),
                None => out.push_str(name),
            }
        }
        _ => out.push_str(next.text),
    }
    Ok(())
}

/// Writes `text` so that TeX typesets it literally.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '\\' => out.push_str("$\\backslash$"),
            '^' => out.push_str("\\^{}"),
            '~' => out.push_str("\\~{}"),
            '\t' => out.push(' '),
            '\n' => out.push_str("{\\hfil\\break}"),
            '\u{a0}' => out.push('~'),
            c if c.is_ascii() => out.push(c),
            c => match GLYPHS.iter().find(|&&(_, g)| g == c) {
                Some((name, _)) => {
                    out.push_str("$\\");
                    out.push_str(name);
                    out.push('$');
                }
                None => {
                    log::warn!("no TeX rendering for {c:?} (U+{:04X})", c as u32);
                    out.push_str("{\\tt\\char\"20}");
                }
            },
        }
    }
    out
}
