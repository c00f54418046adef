use crate::options::CsvOptions;
use std::fmt;

/// One field, trimmed of leading spaces and quoted as the options require.
pub struct CsvField<'a> {
    text: &'a str,
    options: &'a CsvOptions,
}

impl<'a> CsvField<'a> {
    pub fn new(text: &'a str, options: &'a CsvOptions) -> Self {
        Self {
            text: text.trim_start_matches(' '),
            options,
        }
    }
}

impl fmt::Display for CsvField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.options.quote {
            Some(quote) if self.options.needs_quoting(self.text) => {
                write!(f, "{quote}")?;
                for c in self.text.chars() {
                    if c == quote {
                        write!(f, "{c}")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "{quote}")
            }
            _ => f.write_str(self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str, options: &CsvOptions) -> String {
        CsvField::new(text, options).to_string()
    }

    #[test]
    fn fields_are_trimmed_and_quoted() {
        let options = CsvOptions::default();
        assert_eq!(encode("Say \"hi\"", &options), "\"Say \"\"hi\"\"\"");
        assert_eq!(encode("   leading spaces", &options), "leading spaces");
        assert_eq!(encode("two\nlines", &options), "\"two\nlines\"");
        assert_eq!(encode("trailing  ", &options), "trailing  ");

        let single = CsvOptions {
            quote: Some('\''),
            separator: ";".into(),
            ..CsvOptions::default()
        };
        assert_eq!(encode("it's; fine", &single), "'it''s; fine'");
        assert_eq!(encode("a,b", &single), "a,b");
    }
}
