use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::article::Article;
use crate::error::{FetchError, Result};
use crate::generator::GeneratorConfig;
use crate::language::{formatter_for, random_sentences, Language};

/// Where articles come from.
///
/// Sources may return fewer articles than asked for; callers do not retry.
pub trait ArticleSource: Send + Sync {
    fn fetch_articles(
        &self,
        count: usize,
        config: &GeneratorConfig,
    ) -> std::result::Result<Vec<Article>, FetchError>;
}

/// A replenishment request produced when a new session starts
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRequest {
    pub id: u64,
    pub count: usize,
    pub config: GeneratorConfig,
    /// Generator generation the request was made under
    pub generation: u64,
}

impl ArticleRequest {
    /// Run the request against `source` on the current thread.
    pub fn fulfil(self, source: &dyn ArticleSource) -> FetchResponse {
        let articles = source.fetch_articles(self.count, &self.config);
        FetchResponse {
            request: self,
            articles,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub request: ArticleRequest,
    pub articles: std::result::Result<Vec<Article>, FetchError>,
}

/// Generates articles from the bundled word lists
#[derive(Debug, Clone, Copy, Default)]
pub struct WordArticleSource;

impl WordArticleSource {
    fn generate(&self, language: &Language, config: &GeneratorConfig) -> Article {
        let rng = &mut rand::thread_rng();

        let text = match config.number_of_sentences {
            Some(sentences) => random_sentences(sentences.max(1), rng),
            None => {
                let words = language.random_words(config.number_of_words.max(1), rng);
                formatter_for(config.capitalize, config.symbols).format(&words, rng)
            }
        };

        Article::from_text(&text).with_title(language.name.clone())
    }
}

impl ArticleSource for WordArticleSource {
    fn fetch_articles(
        &self,
        count: usize,
        config: &GeneratorConfig,
    ) -> std::result::Result<Vec<Article>, FetchError> {
        let language = Language::load(config.language)?;
        Ok((0..count).map(|_| self.generate(&language, config)).collect())
    }
}

/// Cycles through a fixed set of articles, ignoring the generator config
#[derive(Debug, Default)]
pub struct TextArticleSource {
    articles: Vec<Article>,
    next: AtomicUsize,
}

impl TextArticleSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: articles.into_iter().filter(|a| !a.is_empty()).collect(),
            next: AtomicUsize::new(0),
        }
    }

    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(texts.iter().map(|t| Article::from_text(t.as_ref())).collect())
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl ArticleSource for TextArticleSource {
    fn fetch_articles(
        &self,
        count: usize,
        _config: &GeneratorConfig,
    ) -> std::result::Result<Vec<Article>, FetchError> {
        if self.articles.is_empty() {
            return Err(FetchError::Empty);
        }
        let start = self.next.fetch_add(count, Ordering::Relaxed);
        Ok((start..start + count)
            .map(|i| self.articles[i % self.articles.len()].clone())
            .collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleEntry {
    Text(String),
    Article(Article),
}

/// Articles read from a JSON file: an array of plain texts or token lists
pub struct FileArticleSource;

impl FileArticleSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<TextArticleSource> {
        let bytes = fs::read(path.as_ref())?;
        let entries: Vec<ArticleEntry> = serde_json::from_slice(&bytes)?;

        let articles: Vec<Article> = entries
            .into_iter()
            .map(|entry| match entry {
                ArticleEntry::Text(text) => Article::from_text(&text),
                ArticleEntry::Article(article) => article,
            })
            .collect();

        let source = TextArticleSource::new(articles);
        if source.is_empty() {
            return Err(FetchError::Empty.into());
        }
        tracing::debug!(path = %path.as_ref().display(), articles = source.len(), "loaded articles");
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::SupportedLanguage;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn word_source_returns_requested_count() {
        let config = GeneratorConfig {
            number_of_words: 6,
            ..GeneratorConfig::default()
        };

        let articles = WordArticleSource.fetch_articles(3, &config).unwrap();

        assert_eq!(articles.len(), 3);
        for article in &articles {
            assert_eq!(article.word_count(), 6);
            assert_eq!(article.title.as_deref(), Some("english"));
        }
    }

    #[test]
    fn word_source_sentences() {
        let config = GeneratorConfig {
            language: SupportedLanguage::EnglishLong,
            number_of_sentences: Some(2),
            ..GeneratorConfig::default()
        };

        let articles = WordArticleSource.fetch_articles(1, &config).unwrap();
        assert!(!articles[0].is_empty());
    }

    #[test]
    fn word_source_zero_count() {
        let articles = WordArticleSource
            .fetch_articles(0, &GeneratorConfig::default())
            .unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn text_source_cycles() {
        let source = TextArticleSource::from_texts(&["one", "two"]);
        let config = GeneratorConfig::default();

        let first: Vec<String> = source.fetch_articles(3, &config).unwrap().iter().map(Article::text).collect();
        let second: Vec<String> = source.fetch_articles(1, &config).unwrap().iter().map(Article::text).collect();

        assert_eq!(first, vec!["one", "two", "one"]);
        assert_eq!(second, vec!["two"]);
    }

    #[test]
    fn empty_text_source_fails() {
        let source = TextArticleSource::from_texts(&["", ""]);
        assert_eq!(
            source.fetch_articles(1, &GeneratorConfig::default()),
            Err(FetchError::Empty)
        );
    }

    #[test]
    fn request_fulfilment_carries_request() {
        let source = TextArticleSource::from_texts(&["go run"]);
        let request = ArticleRequest {
            id: 4,
            count: 2,
            config: GeneratorConfig::default(),
            generation: 0,
        };

        let response = request.clone().fulfil(&source);

        assert_eq!(response.request, request);
        assert_eq!(response.articles.unwrap().len(), 2);
    }

    #[test]
    fn file_source_reads_texts_and_articles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.json");
        fs::write(
            &path,
            r#"["plain text here", { "tokens": [{ "type": "word", "value": "tok" }], "title": "t" }]"#,
        )
        .unwrap();

        let source = FileArticleSource::open(&path).unwrap();
        let articles = source.fetch_articles(2, &GeneratorConfig::default()).unwrap();

        assert_eq!(articles[0].text(), "plain text here");
        assert_eq!(articles[1].title.as_deref(), Some("t"));
    }

    #[test]
    fn file_source_errors() {
        let dir = tempdir().unwrap();

        assert_matches!(FileArticleSource::open(dir.path().join("missing.json")), Err(Error::Io(_)));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{").unwrap();
        assert_matches!(FileArticleSource::open(&bad), Err(Error::Json(_)));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "[]").unwrap();
        assert_matches!(FileArticleSource::open(&empty), Err(Error::Fetch(FetchError::Empty)));
    }
}
