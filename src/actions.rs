use crate::config::{CursorStyle, Preferences, ThemeStyle};
use crate::error::Result;
use crate::generator::GeneratorConfig;
use crate::runtime::{Clock, SystemClock};
use crate::session::{Advance, SessionStatus};
use crate::source::{ArticleRequest, ArticleSource, FetchResponse};
use crate::store::{State, Store};

/// The operations a front-end drives.
///
/// Each operation is applied through [`Store::update`], so related changes
/// (say, a reset followed by a queue pop) are published together.
pub struct Actions {
    store: Store,
    clock: Box<dyn Clock>,
    next_request_id: u64,
    /// Highest request id whose articles were applied
    applied_request_id: Option<u64>,
}

impl Actions {
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: Store, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            next_request_id: 0,
            applied_request_id: None,
        }
    }

    pub fn state(&self) -> &State {
        self.store.state()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Start a new session, dropping the current one.
    ///
    /// Without `force`, a session that is `Ready` (nothing typed yet) is kept.
    /// Returns the request that will top the article queue back up; fulfil it
    /// and hand the response to [`Actions::receive_response`].
    pub fn start_new_session(&mut self, force: bool) -> Option<ArticleRequest> {
        if !force && self.state().status() == SessionStatus::Ready {
            return None;
        }

        let promoted = self.store.update(|state| {
            state.reset_session();
            state.pop_article_queue()
        });
        tracing::debug!(promoted, status = %self.state().status(), "new session");

        let count = self.state().articles_needed();
        if count == 0 {
            return None;
        }

        self.next_request_id += 1;
        Some(ArticleRequest {
            id: self.next_request_id,
            count,
            config: self.state().generator.clone(),
            generation: self.state().generator_generation,
        })
    }

    /// Apply fetched articles.
    ///
    /// Responses made under an older generator config, or older than one that
    /// was already applied, are dropped. A failed fetch is returned as an error
    /// and leaves the state as it was.
    pub fn receive_response(&mut self, response: FetchResponse) -> Result<bool> {
        let FetchResponse { request, articles } = response;
        let articles = articles.map_err(|err| {
            tracing::warn!(id = request.id, %err, "article fetch failed");
            err
        })?;

        if request.generation != self.state().generator_generation {
            tracing::debug!(id = request.id, "dropping articles for an outdated generator");
            return Ok(false);
        }
        if self.applied_request_id.is_some_and(|applied| request.id < applied) {
            tracing::debug!(id = request.id, "dropping articles from a superseded request");
            return Ok(false);
        }

        self.applied_request_id = Some(request.id);
        self.store.update(|state| state.receive_articles(articles));
        Ok(true)
    }

    /// Start a new session and replenish the queue from `source` right away.
    pub fn start_new_session_with(&mut self, source: &dyn ArticleSource, force: bool) -> Result<()> {
        if let Some(request) = self.start_new_session(force) {
            self.receive_response(request.fulfil(source))?;
        }
        Ok(())
    }

    pub fn set_input_value(&mut self, value: &str) {
        let now = self.clock.now();
        self.store.update(|state| state.set_input_value(value, now));
    }

    /// Cross a token boundary.
    ///
    /// Finishing the article records its result and moves straight on to a new
    /// session, whose replenishment request is returned.
    pub fn input_whitespace(&mut self) -> Result<Option<ArticleRequest>> {
        let now = self.clock.now();
        let advance = self.store.update(|state| state.input_whitespace(now));
        if advance != Advance::Done {
            return Ok(None);
        }

        let result = self.store.try_update(|state| state.generate_results(now))?;
        tracing::info!(
            wpm = result.wpm(),
            accuracy = result.accuracy(),
            mistakes = result.mistakes,
            duration_ms = result.duration_ms,
            "article finished"
        );

        Ok(self.start_new_session(false))
    }

    /// Cross a token boundary, fetching any follow-up articles from `source`.
    pub fn input_whitespace_with(&mut self, source: &dyn ArticleSource) -> Result<()> {
        if let Some(request) = self.input_whitespace()? {
            self.receive_response(request.fulfil(source))?;
        }
        Ok(())
    }

    /// Close out the current attempt without waiting for the article to end.
    pub fn generate_results(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.store.try_update(|state| state.generate_results(now))?;
        Ok(())
    }

    /// Change what gets generated; `None` restores the default.
    pub fn set_generator_config(&mut self, generator: Option<GeneratorConfig>) {
        self.store
            .update(|state| state.set_generator_config(generator.unwrap_or_default()));
    }

    pub fn update_preferences(&mut self, f: impl FnOnce(&mut Preferences)) {
        self.store.update(|state| f(&mut state.preferences));
    }

    pub fn set_theme_style(&mut self, value: ThemeStyle) {
        self.update_preferences(|prefs| prefs.theme_style = value);
    }

    pub fn set_cursor_style(&mut self, value: CursorStyle) {
        self.update_preferences(|prefs| prefs.cursor_style = value);
    }
}
