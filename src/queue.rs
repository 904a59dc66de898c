use crate::article::Article;
use crate::generator::GeneratorConfig;
use crate::session::Session;
use crate::store::State;

/// How many articles to keep queued beyond the next one, unless configured
pub const MAX_QUEUE_DEPTH: usize = 1;

/// Largest configurable queue depth; deeper settings are clamped
pub const QUEUE_DEPTH_LIMIT: usize = 32;

/// Bring a configured depth within [`QUEUE_DEPTH_LIMIT`].
pub fn clamp_queue_depth(depth: usize) -> usize {
    if depth > QUEUE_DEPTH_LIMIT {
        tracing::warn!(depth, limit = QUEUE_DEPTH_LIMIT, "queue depth clamped");
    }
    depth.min(QUEUE_DEPTH_LIMIT)
}

impl State {
    /// Most articles the queue may hold
    pub fn queue_capacity(&self) -> usize {
        self.queue_depth.saturating_add(1)
    }

    /// How many articles to request so the queue is full again
    pub fn articles_needed(&self) -> usize {
        self.queue_capacity().saturating_sub(self.article_queue.len())
    }

    /// Promote the head of the queue, but only while waiting for an article.
    pub fn pop_article_queue(&mut self) -> bool {
        if self.session != Session::Pending {
            return false;
        }
        let Some(article) = self.article_queue.pop_front() else {
            return false;
        };

        tracing::debug!(queued = self.article_queue.len(), "article promoted from queue");
        self.load_article(article);
        true
    }

    /// Take in freshly fetched articles.
    ///
    /// When nothing is loaded the first one is loaded right away. The queue is
    /// replaced, not extended: the request was sized against the queue length.
    pub fn receive_articles(&mut self, articles: Vec<Article>) {
        let mut articles = articles.into_iter().filter(|a| !a.is_empty());

        if !self.has_article() {
            if let Some(article) = articles.next() {
                self.load_article(article);
            }
        }

        self.article_queue = articles.take(self.queue_capacity()).collect();
        tracing::debug!(queued = self.article_queue.len(), "article queue replaced");
    }

    /// Switch what gets generated; queued articles no longer apply.
    pub fn set_generator_config(&mut self, generator: GeneratorConfig) {
        self.generator = generator;
        self.generator_generation += 1;
        self.article_queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::Local;

    fn article(text: &str) -> Article {
        Article::from_text(text)
    }

    fn queue_texts(state: &State) -> Vec<String> {
        state.article_queue.iter().map(Article::text).collect()
    }

    #[test]
    fn receive_loads_first_when_waiting() {
        let mut state = State::default();

        state.receive_articles(vec![article("one"), article("two")]);

        assert_eq!(state.session, Session::Ready);
        assert_eq!(state.article.as_ref().map(Article::text), Some("one".to_string()));
        assert_eq!(queue_texts(&state), vec!["two"]);
    }

    #[test]
    fn receive_replaces_queue_when_loaded() {
        let mut state = State::default();
        state.load_article(article("current"));
        state.article_queue.push_back(article("stale"));

        state.receive_articles(vec![article("fresh")]);

        assert_eq!(state.article.as_ref().map(Article::text), Some("current".to_string()));
        assert_eq!(queue_texts(&state), vec!["fresh"]);
    }

    #[test]
    fn receive_does_not_interrupt_typing() {
        let mut state = State::default();
        state.load_article(article("current text"));
        state.set_input_value("cur", Local::now());

        state.receive_articles(vec![article("next")]);

        assert_eq!(state.current_input.value, "cur");
        assert_eq!(state.status(), crate::session::SessionStatus::Ongoing);
    }

    #[test]
    fn receive_skips_empty_articles() {
        let mut state = State::default();

        state.receive_articles(vec![Article::default(), article("real")]);

        assert_eq!(state.article.as_ref().map(Article::text), Some("real".to_string()));
        assert!(state.article_queue.is_empty());
    }

    #[test]
    fn receive_nothing_while_waiting_empties_queue() {
        let mut state = State::default();

        state.receive_articles(Vec::new());

        assert_eq!(state.session, Session::Pending);
        assert!(state.article_queue.is_empty());
    }

    #[test]
    fn queue_never_exceeds_capacity() {
        let mut state = State::default();
        let flood = || (0..10).map(|i| article(&format!("a{i}"))).collect::<Vec<_>>();

        state.receive_articles(flood());
        assert!(state.article_queue.len() <= MAX_QUEUE_DEPTH + 1);

        for _ in 0..5 {
            state.reset_session();
            state.pop_article_queue();
            state.receive_articles(flood());
            assert!(state.article_queue.len() <= MAX_QUEUE_DEPTH + 1);
        }
    }

    #[test]
    fn pop_only_when_pending() {
        let mut state = State::default();
        state.load_article(article("current"));
        state.article_queue.push_back(article("next"));

        assert!(!state.pop_article_queue());
        assert_eq!(state.article_queue.len(), 1);

        state.reset_session();
        assert!(state.pop_article_queue());
        assert_eq!(state.session, Session::Ready);
        assert_eq!(state.article.as_ref().map(Article::text), Some("next".to_string()));
        assert!(state.article_queue.is_empty());
    }

    #[test]
    fn pop_on_empty_queue_is_noop() {
        let mut state = State::default();
        assert!(!state.pop_article_queue());
        assert_eq!(state.session, Session::Pending);
    }

    #[test]
    fn articles_needed_refills_to_capacity() {
        let mut state = State::default();
        assert_eq!(state.articles_needed(), MAX_QUEUE_DEPTH + 1);

        state.article_queue.push_back(article("queued"));
        assert_eq!(state.articles_needed(), MAX_QUEUE_DEPTH);

        state.queue_depth = 3;
        assert_eq!(state.articles_needed(), 3);
    }

    #[test]
    fn oversized_depth_is_clamped() {
        let config = Config {
            queue_depth: usize::MAX,
            ..Config::default()
        };
        let state = State::new(&config);

        assert_eq!(state.queue_depth, QUEUE_DEPTH_LIMIT);
        assert_eq!(state.articles_needed(), QUEUE_DEPTH_LIMIT + 1);
    }

    #[test]
    fn capacity_saturates() {
        let mut state = State::default();
        state.queue_depth = usize::MAX;

        assert_eq!(state.queue_capacity(), usize::MAX);
        assert_eq!(state.articles_needed(), usize::MAX);
    }

    #[test]
    fn generator_change_invalidates_queue() {
        let mut state = State::default();
        state.article_queue.push_back(article("queued"));
        let generation = state.generator_generation;

        let mut generator = state.generator.clone();
        generator.number_of_words = 99;
        state.set_generator_config(generator);

        assert!(state.article_queue.is_empty());
        assert_eq!(state.generator.number_of_words, 99);
        assert_eq!(state.generator_generation, generation + 1);
    }
}
