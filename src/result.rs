use serde::{Deserialize, Serialize};

use crate::article::Token;
use crate::session::FinishedToken;
use crate::util::{mean, std_dev};

/// Characters per word used by the words-per-minute metrics
const CHARS_PER_WORD: f64 = 5.0;

/// Everything the result builder looks at
#[derive(Debug, Clone, Copy)]
pub struct ResultInput<'a> {
    pub is_interim: bool,
    pub duration_ms: u64,
    pub tokens: &'a [Token],
    pub finished_tokens: &'a [FinishedToken],
}

/// Scored outcome of a (possibly partial) attempt at an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub is_interim: bool,
    pub duration_ms: u64,
    /// Tokens that took part in scoring, whitespace included
    pub token_count: usize,
    pub word_count: usize,
    /// Expected characters; a whitespace run counts as one
    pub char_count: usize,
    pub typed_char_count: usize,
    pub mistakes: usize,
    /// Words finished without a single mistake
    pub perfect_words: usize,
}

/// Aggregate the finished tokens against the tokens they were typed for.
///
/// Tokens are paired positionally; tokens without a finished entry are left
/// out so partial slices can be scored mid-session.
pub fn build(input: ResultInput<'_>) -> SessionResult {
    let mut result = SessionResult {
        is_interim: input.is_interim,
        duration_ms: input.duration_ms,
        token_count: 0,
        word_count: 0,
        char_count: 0,
        typed_char_count: 0,
        mistakes: 0,
        perfect_words: 0,
    };

    for (token, finished) in input.tokens.iter().zip(input.finished_tokens) {
        result.token_count += 1;
        result.mistakes += finished.mistakes;
        result.typed_char_count += finished.value.chars().count();

        if token.is_whitespace() {
            result.char_count += 1;
        } else {
            result.char_count += token.len();
            result.word_count += 1;
            if finished.mistakes == 0 {
                result.perfect_words += 1;
            }
        }
    }

    result
}

impl SessionResult {
    fn minutes(&self) -> f64 {
        self.duration_ms as f64 / 60_000.0
    }

    /// Percentage of expected characters typed correctly
    pub fn accuracy(&self) -> f64 {
        if self.char_count == 0 {
            return 100.0;
        }
        let correct = self.char_count.saturating_sub(self.mistakes);
        correct as f64 / self.char_count as f64 * 100.0
    }

    /// Net words per minute, mistakes deducted
    pub fn wpm(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let correct = self.char_count.saturating_sub(self.mistakes);
        correct as f64 / CHARS_PER_WORD / self.minutes()
    }

    /// Gross words per minute over everything typed
    pub fn raw_wpm(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.typed_char_count as f64 / CHARS_PER_WORD / self.minutes()
    }
}

/// Summary over the result history of the running process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsSummary {
    pub count: usize,
    pub mean_wpm: f64,
    pub mean_accuracy: f64,
    pub wpm_std_dev: f64,
}

impl ResultsSummary {
    pub fn from_results(results: &[SessionResult]) -> Self {
        let wpms: Vec<f64> = results.iter().map(SessionResult::wpm).collect();
        let accuracies: Vec<f64> = results.iter().map(SessionResult::accuracy).collect();

        Self {
            count: results.len(),
            mean_wpm: mean(&wpms).unwrap_or_default(),
            mean_accuracy: mean(&accuracies).unwrap_or_default(),
            wpm_std_dev: std_dev(&wpms).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::tokenize;

    fn finished(value: &str, mistakes: usize) -> FinishedToken {
        FinishedToken {
            value: value.to_string(),
            mistakes,
        }
    }

    #[test]
    fn builds_over_fully_finished_article() {
        let tokens = tokenize("go run");
        let done = vec![finished("go", 0), finished(" ", 0), finished("run", 0)];

        let result = build(ResultInput {
            is_interim: false,
            duration_ms: 6_000,
            tokens: &tokens,
            finished_tokens: &done,
        });

        assert!(!result.is_interim);
        assert_eq!(result.token_count, 3);
        assert_eq!(result.word_count, 2);
        assert_eq!(result.char_count, 6);
        assert_eq!(result.typed_char_count, 6);
        assert_eq!(result.mistakes, 0);
        assert_eq!(result.perfect_words, 2);
        assert_eq!(result.accuracy(), 100.0);
        // 6 chars / 5 per word over a tenth of a minute
        assert!((result.wpm() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn tokens_without_entries_are_excluded() {
        let tokens = tokenize("one two three");
        let done = vec![finished("one", 0), finished(" ", 0)];

        let result = build(ResultInput {
            is_interim: true,
            duration_ms: 1_000,
            tokens: &tokens,
            finished_tokens: &done,
        });

        assert!(result.is_interim);
        assert_eq!(result.token_count, 2);
        assert_eq!(result.word_count, 1);
        assert_eq!(result.char_count, 4);
    }

    #[test]
    fn mistakes_reduce_accuracy_and_net_speed() {
        let tokens = tokenize("go");
        let done = vec![finished("gi", 1)];

        let result = build(ResultInput {
            is_interim: false,
            duration_ms: 60_000,
            tokens: &tokens,
            finished_tokens: &done,
        });

        assert_eq!(result.mistakes, 1);
        assert_eq!(result.perfect_words, 0);
        assert_eq!(result.accuracy(), 50.0);
        assert!(result.wpm() < result.raw_wpm());
    }

    #[test]
    fn zero_duration_has_no_speed() {
        let tokens = tokenize("go");
        let done = vec![finished("go", 0)];

        let result = build(ResultInput {
            is_interim: false,
            duration_ms: 0,
            tokens: &tokens,
            finished_tokens: &done,
        });

        assert_eq!(result.wpm(), 0.0);
        assert_eq!(result.raw_wpm(), 0.0);
    }

    #[test]
    fn building_is_deterministic() {
        let tokens = tokenize("same input same output");
        let done = vec![finished("same", 0), finished(" ", 0), finished("inptu", 2)];
        let input = ResultInput {
            is_interim: true,
            duration_ms: 4_321,
            tokens: &tokens,
            finished_tokens: &done,
        };

        assert_eq!(build(input), build(input));
    }

    #[test]
    fn summary_of_empty_history() {
        let summary = ResultsSummary::from_results(&[]);
        assert_eq!(summary, ResultsSummary::default());
    }

    #[test]
    fn summary_averages_results() {
        let tokens = tokenize("go");
        let fast = build(ResultInput {
            is_interim: false,
            duration_ms: 6_000,
            tokens: &tokens,
            finished_tokens: &[finished("go", 0)],
        });
        let slow = build(ResultInput {
            is_interim: false,
            duration_ms: 12_000,
            tokens: &tokens,
            finished_tokens: &[finished("go", 0)],
        });

        let summary = ResultsSummary::from_results(&[fast.clone(), slow.clone()]);

        assert_eq!(summary.count, 2);
        assert!((summary.mean_wpm - (fast.wpm() + slow.wpm()) / 2.0).abs() < 1e-9);
        assert_eq!(summary.mean_accuracy, 100.0);
        assert!(summary.wpm_std_dev > 0.0);
    }
}
