use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::FetchError;
use crate::generator::SupportedLanguage;

static LANG_DIR: Dir = include_dir!("src/lang");

/// A bundled word list
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(language: SupportedLanguage) -> Result<Self, FetchError> {
        read_language_from_file(&language.file_stem())
    }

    /// Pick `count` words, without repeats while the list is long enough.
    pub fn random_words<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        if count <= self.words.len() {
            return self.words.choose_multiple(rng, count).cloned().collect();
        }
        (0..count)
            .filter_map(|_| self.words.choose(rng).cloned())
            .collect()
    }
}

fn read_language_from_file(stem: &str) -> Result<Language, FetchError> {
    let file = LANG_DIR
        .get_file(format!("{stem}.json"))
        .ok_or_else(|| FetchError::LanguageNotFound(stem.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| FetchError::Unreadable(format!("{stem}.json is not UTF-8")))?;

    let lang: Language =
        serde_json::from_str(contents).map_err(|e| FetchError::Unreadable(e.to_string()))?;

    if lang.words.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(lang)
}
