// Library surface for the binary and for headless integration tests.
pub mod actions;
pub mod article;
pub mod config;
pub mod error;
pub mod generator;
pub mod language;
pub mod queue;
pub mod result;
pub mod runtime;
pub mod scorer;
pub mod session;
pub mod source;
pub mod store;
pub mod ui;
pub mod util;

pub use actions::Actions;
pub use error::{Error, FetchError, Result};
