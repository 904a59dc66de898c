use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::article::{Article, Token};
use crate::error::{Error, Result};
use crate::result::{self, ResultInput, SessionResult};
use crate::scorer::{is_accurate_prefix, mistake_count};
use crate::store::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    /// Waiting for an article
    Pending,
    /// Article loaded, nothing typed yet
    Ready,
    Ongoing { started_at: DateTime<Local> },
}

impl Session {
    pub fn status(&self) -> SessionStatus {
        match self {
            Session::Pending => SessionStatus::Pending,
            Session::Ready => SessionStatus::Ready,
            Session::Ongoing { .. } => SessionStatus::Ongoing,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        match self {
            Session::Ongoing { started_at } => Some(*started_at),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Ready,
    Ongoing,
}

/// Recorded outcome of one completed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedToken {
    pub value: String,
    pub mistakes: usize,
}

impl FinishedToken {
    fn whitespace() -> Self {
        Self {
            value: " ".to_string(),
            mistakes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentInput {
    pub token_index: usize,
    pub char_index: usize,
    pub value: String,
    pub is_accurate: bool,
    /// One entry per token index below `token_index`, in order
    pub finished_tokens: Vec<FinishedToken>,
}

impl Default for CurrentInput {
    fn default() -> Self {
        Self {
            token_index: 0,
            char_index: 0,
            value: String::new(),
            is_accurate: true,
            finished_tokens: Vec::new(),
        }
    }
}

impl CurrentInput {
    fn record(&mut self, index: usize, finished: FinishedToken) {
        if let Some(slot) = self.finished_tokens.get_mut(index) {
            *slot = finished;
        } else {
            debug_assert_eq!(index, self.finished_tokens.len());
            self.finished_tokens.push(finished);
        }
    }
}

/// What a boundary key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// No session in progress
    Idle,
    /// Nothing typed since the last boundary; ignored
    Repeat,
    /// Moved on to the next word
    Next,
    /// Every token has been typed
    Done,
}

impl Advance {
    pub fn is_done(self) -> bool {
        self == Advance::Done
    }
}

fn elapsed_ms(started_at: DateTime<Local>, now: DateTime<Local>) -> u64 {
    (now - started_at).num_milliseconds().max(0) as u64
}

impl State {
    /// Back to [`Session::Pending`] with no article and a clean input.
    pub fn reset_session(&mut self) {
        self.session = Session::Pending;
        self.interim_result = None;
        self.current_input = CurrentInput::default();
        self.article = None;
    }

    /// Load `article` and park the cursor on its first word.
    ///
    /// Leading whitespace is recorded as finished, as it is after a word.
    pub fn load_article(&mut self, article: Article) {
        self.reset_session();
        self.session = Session::Ready;

        let leading = article
            .tokens
            .iter()
            .take_while(|t| t.is_whitespace())
            .count();
        for index in 0..leading {
            self.current_input.record(index, FinishedToken::whitespace());
        }
        self.current_input.token_index = leading;

        self.article = Some(article);
    }

    /// Whether an article with at least one word is loaded
    pub fn has_article(&self) -> bool {
        self.article.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.article
            .as_ref()
            .and_then(|a| a.tokens.get(self.current_input.token_index))
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Replace the text typed for the current token.
    ///
    /// The first keystroke after an article is loaded starts the clock.
    pub fn set_input_value(&mut self, value: &str, now: DateTime<Local>) {
        if self.session == Session::Ready && self.has_article() {
            tracing::debug!("session started");
            self.session = Session::Ongoing { started_at: now };
        }

        let is_accurate = self
            .current_token()
            .is_some_and(|token| is_accurate_prefix(&token.value, value));

        let input = &mut self.current_input;
        input.is_accurate = is_accurate;
        input.value = value.to_string();
        input.char_index = value.chars().count();
    }

    /// Complete the current token and skip over the whitespace that follows it.
    ///
    /// Returns [`Advance::Done`] without touching the cursor once the end of the
    /// article is reached; generating the results is up to the caller.
    pub fn input_whitespace(&mut self, now: DateTime<Local>) -> Advance {
        let Session::Ongoing { started_at } = self.session else {
            return Advance::Idle;
        };
        let Some(article) = self.article.as_ref() else {
            return Advance::Idle;
        };
        let tokens = &article.tokens;
        let index = self.current_input.token_index;
        let Some(token) = tokens.get(index) else {
            return Advance::Idle;
        };

        if self.current_input.value.is_empty() {
            self.current_input.char_index = 0;
            return Advance::Repeat;
        }

        let value = self.current_input.value.clone();
        let mistakes = mistake_count(&token.value, &value);
        self.current_input
            .record(index, FinishedToken { value, mistakes });

        let mut next = index + 1;
        while tokens.get(next).is_some_and(Token::is_whitespace) {
            self.current_input.record(next, FinishedToken::whitespace());
            next += 1;
        }

        if next >= tokens.len() {
            return Advance::Done;
        }

        let input = &mut self.current_input;
        input.token_index = next;
        input.char_index = 0;
        input.value.clear();
        input.is_accurate = true;

        let end = next + 1;
        self.interim_result = Some(result::build(ResultInput {
            is_interim: true,
            duration_ms: elapsed_ms(started_at, now),
            tokens: &tokens[..end.min(tokens.len())],
            finished_tokens: &input.finished_tokens[..end.min(input.finished_tokens.len())],
        }));

        Advance::Next
    }

    /// Score the whole attempt and append it to the result history.
    pub fn generate_results(&mut self, now: DateTime<Local>) -> Result<SessionResult> {
        let Session::Ongoing { started_at } = self.session else {
            return Err(Error::InvariantViolation {
                operation: "generate results",
                status: self.status(),
            });
        };
        let tokens = self.article.as_ref().map_or(&[][..], |a| &a.tokens[..]);

        let result = result::build(ResultInput {
            is_interim: false,
            duration_ms: elapsed_ms(started_at, now),
            tokens,
            finished_tokens: &self.current_input.finished_tokens,
        });
        self.results.push(result.clone());

        Ok(result)
    }
}
