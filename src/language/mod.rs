pub mod core;
pub mod formatter;
pub mod sentences;

pub use self::core::Language;
pub use formatter::{formatter_for, PlainFormatter, PunctuatedFormatter, TextFormatter};
pub use sentences::random_sentences;
