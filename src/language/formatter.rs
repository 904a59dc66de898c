use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

const BRACKETS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];
const MATH_SYMBOLS: [&str; 7] = ["+", "-", "*", "/", "=", "<", ">"];
const CODE_SYMBOLS: [&str; 10] = ["@", "#", "$", "%", "^", "&", "|", "\\", "~", "`"];
const TRAILING_SYMBOLS: [&str; 4] = [":", ";", "\"", "'"];

/// Turns a list of words into the text of an article
pub trait TextFormatter {
    fn format(&self, words: &[String], rng: &mut dyn RngCore) -> String;
}

/// Words separated by single spaces
pub struct PlainFormatter;

impl TextFormatter for PlainFormatter {
    fn format(&self, words: &[String], _rng: &mut dyn RngCore) -> String {
        words.join(" ")
    }
}

/// Sentence-like text: capitals, separators and closing punctuation
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuatedFormatter {
    pub capitalize: bool,
    pub symbols: bool,
}

impl PunctuatedFormatter {
    fn decorate(&self, word: &str, first: bool, rng: &mut dyn RngCore) -> String {
        let mut word = if self.capitalize && (first || rng.gen_bool(0.2)) {
            capitalize_first_letter(word)
        } else {
            word.to_string()
        };

        if self.symbols && rng.gen_bool(0.25) {
            word = match rng.gen_range(0..4) {
                0 => {
                    let (open, close) = BRACKETS[rng.gen_range(0..BRACKETS.len())];
                    format!("{open}{word}{close}")
                }
                1 => {
                    let symbol = MATH_SYMBOLS.choose(rng).copied().unwrap_or("+");
                    if rng.gen_bool(0.5) {
                        format!("{symbol}{word}")
                    } else {
                        format!("{word}{symbol}")
                    }
                }
                2 => {
                    let symbol = CODE_SYMBOLS.choose(rng).copied().unwrap_or("#");
                    format!("{symbol}{word}")
                }
                _ => {
                    let symbol = TRAILING_SYMBOLS.choose(rng).copied().unwrap_or(":");
                    format!("{word}{symbol}")
                }
            };
        }

        word
    }

    fn separator(&self, rng: &mut dyn RngCore) -> Option<char> {
        if self.symbols {
            match rng.gen_range(0..10) {
                0 => Some(','),
                1 => Some(';'),
                _ => None,
            }
        } else if self.capitalize && rng.gen_bool(0.15) {
            Some(',')
        } else {
            None
        }
    }

    fn closing(&self, rng: &mut dyn RngCore) -> &'static str {
        let roll = rng.gen_range(0..100);
        if self.symbols {
            match roll {
                0..=50 => ".",
                51..=65 => "!",
                66..=75 => "?",
                76..=85 => ";",
                86..=92 => ":",
                _ => "...",
            }
        } else {
            match roll {
                0..=79 => ".",
                80..=94 => "!",
                _ => "?",
            }
        }
    }
}

impl TextFormatter for PunctuatedFormatter {
    fn format(&self, words: &[String], rng: &mut dyn RngCore) -> String {
        let mut text = String::new();

        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                if let Some(sep) = self.separator(rng) {
                    text.push(sep);
                }
                text.push(' ');
            }
            text.push_str(&self.decorate(word, i == 0, rng));
        }

        if !text.is_empty() {
            text.push_str(self.closing(rng));
        }
        text
    }
}

pub fn formatter_for(capitalize: bool, symbols: bool) -> Box<dyn TextFormatter> {
    if !capitalize && !symbols {
        Box::new(PlainFormatter)
    } else {
        Box::new(PunctuatedFormatter {
            capitalize,
            symbols,
        })
    }
}

fn capitalize_first_letter(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
