use std::collections::VecDeque;
use std::fmt;

use crate::article::Article;
use crate::config::{Config, Preferences};
use crate::generator::GeneratorConfig;
use crate::queue::clamp_queue_depth;
use crate::result::SessionResult;
use crate::session::{CurrentInput, Session};

/// Everything a front-end observes.
///
/// Only the [`Store`] hands out mutable access, and only for the duration of
/// one update.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub session: Session,
    pub article: Option<Article>,
    pub current_input: CurrentInput,
    pub interim_result: Option<SessionResult>,
    pub results: Vec<SessionResult>,
    pub article_queue: VecDeque<Article>,
    pub queue_depth: usize,
    pub generator: GeneratorConfig,
    /// Bumped whenever `generator` changes so that stale fetches can be told apart
    pub generator_generation: u64,
    pub preferences: Preferences,
}

impl State {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::Pending,
            article: None,
            current_input: CurrentInput::default(),
            interim_result: None,
            results: Vec::new(),
            article_queue: VecDeque::new(),
            queue_depth: clamp_queue_depth(config.queue_depth),
            generator: config.generator.clone(),
            generator_generation: 0,
            preferences: config.preferences,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

type Listener = Box<dyn FnMut(&State)>;

/// Single-writer owner of [`State`].
///
/// Updates run against a draft copy that replaces the published state once the
/// closure returns, so observers never see a half-applied batch of changes.
pub struct Store {
    state: State,
    version: u64,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(state: State) -> Self {
        Self {
            state,
            version: 0,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of updates published so far
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register an observer called after every published update.
    pub fn subscribe(&mut self, listener: impl FnMut(&State) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn update<R>(&mut self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut draft = self.state.clone();
        let out = f(&mut draft);
        self.publish(draft);
        out
    }

    /// Like [`Store::update`], but a failing closure discards its draft.
    pub fn try_update<T, E>(&mut self, f: impl FnOnce(&mut State) -> Result<T, E>) -> Result<T, E> {
        let mut draft = self.state.clone();
        let out = f(&mut draft)?;
        self.publish(draft);
        Ok(out)
    }

    fn publish(&mut self, draft: State) {
        self.state = draft;
        self.version += 1;
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
