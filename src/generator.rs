use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    English,
    EnglishLong,
}

impl SupportedLanguage {
    /// Name of the bundled word list
    pub fn file_stem(&self) -> String {
        self.to_string().to_lowercase()
    }
}

/// Describes what the article source should generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub language: SupportedLanguage,
    pub number_of_words: usize,
    /// Generate this many full sentences instead of a word list
    pub number_of_sentences: Option<usize>,
    pub capitalize: bool,
    pub symbols: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: SupportedLanguage::English,
            number_of_words: 15,
            number_of_sentences: None,
            capitalize: false,
            symbols: false,
        }
    }
}
