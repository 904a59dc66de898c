use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    Whitespace,
}

/// Indivisible unit of article text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn word(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            value: value.into(),
        }
    }

    pub fn whitespace(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Whitespace,
            value: value.into(),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Length in unicode scalar values
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// An ordered sequence of tokens presented to the user as one practice unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Article {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            title: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(tokenize(text))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Nothing to type: no tokens, or whitespace only
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(Token::is_whitespace)
    }

    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_whitespace()).count()
    }

    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }
}

/// Split text into alternating runs of word and whitespace tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let runs = text.chars().chunk_by(|c| c.is_whitespace());

    runs.into_iter()
        .map(|(is_space, run)| {
            let value: String = run.collect();
            if is_space {
                Token::whitespace(value)
            } else {
                Token::word(value)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_alternates_words_and_whitespace() {
        let tokens = tokenize("go  run\nfast");

        assert_eq!(
            tokens,
            vec![
                Token::word("go"),
                Token::whitespace("  "),
                Token::word("run"),
                Token::whitespace("\n"),
                Token::word("fast"),
            ]
        );
    }

    #[test]
    fn tokenize_keeps_leading_and_trailing_whitespace() {
        let tokens = tokenize(" hi ");

        assert_eq!(tokens.len(), 3);
        assert!(tokens[0].is_whitespace());
        assert_eq!(tokens[1], Token::word("hi"));
        assert!(tokens[2].is_whitespace());
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn article_text_roundtrips_source() {
        let article = Article::from_text("the quick  brown fox");
        assert_eq!(article.text(), "the quick  brown fox");
        assert_eq!(article.word_count(), 4);
    }

    #[test]
    fn whitespace_only_article_is_empty() {
        assert!(Article::default().is_empty());
        assert!(Article::from_text(" \n\t").is_empty());
        assert!(!Article::from_text(" go").is_empty());
    }

    #[test]
    fn token_len_counts_scalar_values() {
        assert_eq!(Token::word("héllo").len(), 5);
    }

    #[test]
    fn token_deserializes_from_tagged_json() {
        let json = r#"{ "tokens": [{ "type": "word", "value": "go" }, { "type": "whitespace", "value": " " }] }"#;
        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.tokens[0], Token::word("go"));
        assert_eq!(article.tokens[1], Token::whitespace(" "));
        assert_eq!(article.title, None);
    }
}
