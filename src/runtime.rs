use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::source::{ArticleRequest, ArticleSource, FetchResponse};

/// Unified event type consumed by the app runner
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// A replenishment request finished, successfully or not
    Articles(FetchResponse),
}

/// Source of application events (keyboard, resize, fetch completions)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Handle used by background work to post events into this source
    fn sender(&self) -> Sender<AppEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        std::thread::spawn(move || loop {
            let sent = match event::read() {
                Ok(CtEvent::Key(key)) => input_tx.send(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => input_tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, "terminal input closed");
                    break;
                }
            };
            if sent.is_err() {
                break;
            }
        });

        Self { tx, rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Test event source fed through a channel
pub struct TestEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl Default for TestEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_source.sender()
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Fulfil `request` on a worker thread and post the response back as an event.
pub fn spawn_fetch(
    source: Arc<dyn ArticleSource>,
    request: ArticleRequest,
    tx: Sender<AppEvent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        tracing::debug!(id = request.id, count = request.count, "fetching articles");
        let response = request.fulfil(source.as_ref());
        if tx.send(AppEvent::Articles(response)).is_err() {
            tracing::debug!("event loop gone, dropping fetched articles");
        }
    })
}

/// Wall clock seam so session timing can be driven in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
