//! The text measurement service used by layout.
//!
//! Font shaping lives outside this crate; layout only needs widths and
//! line breaks, which any [`TextMeasurer`] provides.

use std::fmt::Debug;
use tabula_style::FontDescription;
use tabula_types::points_to_units;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    /// Rendered width in layout units.
    pub width: i32,
}

pub trait TextMeasurer: Debug + Send + Sync {
    /// Returns the width of the widest unbreakable run and the width of the
    /// text set without any wrapping beyond its explicit newlines.
    fn width_range(&self, text: &str, font: &FontDescription) -> (i32, i32);

    /// Breaks `text` into lines no wider than `width` where possible.
    /// Empty text has no lines.
    fn wrap(&self, text: &str, font: &FontDescription, width: i32) -> Vec<TextLine>;

    fn line_height(&self, font: &FontDescription) -> i32;

    /// Height of `text` wrapped to `width`.
    fn height(&self, text: &str, font: &FontDescription, width: i32) -> i32 {
        self.wrap(text, font, width).len() as i32 * self.line_height(font)
    }
}

/// Measures text as if every character had the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchMeasurer {
    /// Advance of one character, in ems.
    pub advance: f64,
    /// Distance between baselines, in ems.
    pub leading: f64,
}

impl Default for FixedPitchMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            leading: 1.2,
        }
    }
}

impl FixedPitchMeasurer {
    fn char_width(&self, font: &FontDescription) -> i32 {
        points_to_units(font.size_pt * self.advance).max(1)
    }

    fn run_width(&self, run: &str, font: &FontDescription) -> i32 {
        run.chars().count() as i32 * self.char_width(font)
    }
}

impl TextMeasurer for FixedPitchMeasurer {
    fn width_range(&self, text: &str, font: &FontDescription) -> (i32, i32) {
        let min = text
            .split_whitespace()
            .map(|word| self.run_width(word, font))
            .max()
            .unwrap_or(0);
        let max = text
            .split('\n')
            .map(|paragraph| self.run_width(paragraph.trim_end(), font))
            .max()
            .unwrap_or(0);
        (min, max.max(min))
    }

    fn wrap(&self, text: &str, font: &FontDescription, width: i32) -> Vec<TextLine> {
        let mut lines = Vec::new();
        if text.is_empty() {
            return lines;
        }
        let space = self.char_width(font);
        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0;
            for word in paragraph.split_whitespace() {
                let word_width = self.run_width(word, font);
                if !current.is_empty() && current_width + space + word_width > width {
                    lines.push(TextLine {
                        text: std::mem::take(&mut current),
                        width: current_width,
                    });
                    current_width = 0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    current_width += space;
                }
                current.push_str(word);
                current_width += word_width;
            }
            lines.push(TextLine {
                text: current,
                width: current_width,
            });
        }
        lines
    }

    fn line_height(&self, font: &FontDescription) -> i32 {
        points_to_units(font.size_pt * self.leading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontDescription {
        FontDescription {
            size_pt: 10.0,
            ..FontDescription::default()
        }
    }

    #[test]
    fn width_range_uses_words_and_paragraphs() {
        let m = FixedPitchMeasurer::default();
        let char_width = 6 * 1024;
        assert_eq!(m.width_range("ab abcd", &font()), (4 * char_width, 7 * char_width));
        assert_eq!(m.width_range("abc\nab", &font()), (3 * char_width, 3 * char_width));
        assert_eq!(m.width_range("", &font()), (0, 0));
    }

    #[test]
    fn wraps_greedily_and_keeps_long_words() {
        let m = FixedPitchMeasurer::default();
        let char_width = 6 * 1024;
        let lines = m.wrap("one two three", &font(), 7 * char_width);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["one two", "three"]);

        let lines = m.wrap("enormous", &font(), 2 * char_width);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 8 * char_width);

        assert!(m.wrap("", &font(), 100).is_empty());
        assert_eq!(m.wrap("a\n\nb", &font(), 100).len(), 3);
        assert_eq!(m.height("a\nb", &font(), 1_000_000), 2 * m.line_height(&font()));
    }
}
