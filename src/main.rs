use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::{mpsc::Sender, Arc, Mutex},
    time::Duration,
};
use tracing_subscriber::EnvFilter;

use typist::{
    config::{Config, ConfigStore, CursorStyle, FileConfigStore, ThemeStyle},
    generator::SupportedLanguage,
    queue::QUEUE_DEPTH_LIMIT,
    runtime::{spawn_fetch, AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::SessionStatus,
    source::{ArticleRequest, ArticleSource, FileArticleSource, TextArticleSource, WordArticleSource},
    store::{State, Store},
    ui::SessionView,
    Actions,
};

const TICK_RATE_MS: u64 = 100;

/// typing practice in the terminal, one article at a time
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words per generated article
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// generate this many full sentences instead of random words
    #[clap(short = 'f', long = "full-sentences")]
    number_of_sentences: Option<usize>,

    /// language to pull words from
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// capitalize words and add punctuation
    #[clap(long)]
    capitalize: bool,

    /// decorate words with symbols
    #[clap(long)]
    symbols: bool,

    /// type this text instead of generated articles
    #[clap(short = 'p', long, conflicts_with = "articles")]
    prompt: Option<String>,

    /// json file holding an array of articles to cycle through
    #[clap(short = 'a', long)]
    articles: Option<PathBuf>,

    /// cursor style
    #[clap(long, value_enum)]
    cursor: Option<CursorStyle>,

    /// color theme
    #[clap(long, value_enum)]
    theme: Option<ThemeStyle>,

    /// articles to keep ready beyond the next one
    #[clap(long, value_parser = clap::value_parser!(u64).range(0..=QUEUE_DEPTH_LIMIT as u64))]
    queue_depth: Option<u64>,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer the command line over the saved config
    fn apply(&self, config: &mut Config) {
        if let Some(words) = self.number_of_words {
            config.generator.number_of_words = words;
        }
        if self.number_of_sentences.is_some() {
            config.generator.number_of_sentences = self.number_of_sentences;
        }
        if let Some(language) = self.language {
            config.generator.language = language;
        }
        config.generator.capitalize |= self.capitalize;
        config.generator.symbols |= self.symbols;
        if let Some(cursor) = self.cursor {
            config.preferences.cursor_style = cursor;
        }
        if let Some(theme) = self.theme {
            config.preferences.theme_style = theme;
        }
        if let Some(depth) = self.queue_depth {
            config.queue_depth = depth as usize;
        }
    }

    fn article_source(&self) -> typist::Result<Arc<dyn ArticleSource>> {
        let source: Arc<dyn ArticleSource> = match (&self.prompt, &self.articles) {
            (Some(prompt), _) => Arc::new(TextArticleSource::from_texts(&[prompt])),
            (None, Some(path)) => Arc::new(FileArticleSource::open(path)?),
            (None, None) => Arc::new(WordArticleSource),
        };
        Ok(source)
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typist=info"));

    // a subscriber may already be installed in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue(Option<ArticleRequest>),
    Quit,
}

fn handle_key(actions: &mut Actions, key: KeyEvent) -> Flow {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Flow::Quit,
        KeyCode::Char('c') if ctrl => Flow::Quit,
        KeyCode::Char('t') if ctrl => {
            let theme = actions.state().preferences.theme_style.toggled();
            actions.set_theme_style(theme);
            Flow::Continue(None)
        }
        KeyCode::Char('k') if ctrl => {
            let cursor = actions.state().preferences.cursor_style.next();
            actions.set_cursor_style(cursor);
            Flow::Continue(None)
        }
        KeyCode::Tab => Flow::Continue(actions.start_new_session(true)),
        KeyCode::Char(' ') | KeyCode::Enter => match actions.input_whitespace() {
            Ok(request) => Flow::Continue(request),
            Err(err) => {
                tracing::error!(%err, "could not finish the article");
                Flow::Continue(None)
            }
        },
        KeyCode::Backspace => {
            let mut value = actions.state().current_input.value.clone();
            if value.pop().is_some() {
                actions.set_input_value(&value);
            }
            Flow::Continue(None)
        }
        KeyCode::Char(c) if !ctrl => {
            let mut value = actions.state().current_input.value.clone();
            value.push(c);
            actions.set_input_value(&value);
            Flow::Continue(None)
        }
        _ => Flow::Continue(None),
    }
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, state: &State) -> io::Result<()> {
    terminal.draw(|f| f.render_widget(SessionView::new(state, Local::now()), f.area()))?;
    Ok(())
}

fn request_articles(
    source: &Arc<dyn ArticleSource>,
    request: Option<ArticleRequest>,
    tx: &Sender<AppEvent>,
) {
    if let Some(request) = request {
        spawn_fetch(Arc::clone(source), request, tx.clone());
    }
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    actions: &mut Actions,
    source: Arc<dyn ArticleSource>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let tx = runner.sender();

    request_articles(&source, actions.start_new_session(true), &tx);
    draw(terminal, actions.state())?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                // only the timer moves between key presses
                if actions.state().status() == SessionStatus::Ongoing {
                    draw(terminal, actions.state())?;
                }
            }
            AppEvent::Resize => draw(terminal, actions.state())?,
            AppEvent::Articles(response) => {
                if let Err(err) = actions.receive_response(response) {
                    tracing::error!(%err, "no articles available");
                }
                draw(terminal, actions.state())?;
            }
            AppEvent::Key(key) => {
                match handle_key(actions, key) {
                    Flow::Quit => break,
                    Flow::Continue(request) => request_articles(&source, request, &tx),
                }
                draw(terminal, actions.state())?;
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    cli.apply(&mut config);
    let source = cli.article_source()?;

    let mut store = Store::new(State::new(&config));
    store.subscribe(|state| {
        tracing::trace!(status = %state.status(), token = state.current_input.token_index, "state published");
    });
    let mut actions = Actions::new(store);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut actions, source);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    config.preferences = actions.state().preferences;
    if let Err(err) = config_store.save(&config) {
        tracing::warn!(path = %config_store.path().display(), %err, "could not save preferences");
    }

    outcome
}
