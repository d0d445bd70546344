use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::timer::SecondClock;

/// Poll interval of the event loop.
pub const TICK_RATE_MS: u64 = 100;

/// Events the interview loop reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterviewEvent {
    Key(KeyEvent),
    Resize,
    /// An idle poll interval passed without a whole session second completing.
    Tick,
    /// This many whole seconds of session time completed.
    Second(u64),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<InterviewEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<InterviewEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let sent = match event::read() {
                // Windows reports releases too; only presses edit the answer
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(InterviewEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(InterviewEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if sent.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InterviewEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
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

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<InterviewEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<InterviewEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InterviewEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time and keeps session time.
///
/// Idle poll intervals are folded into whole seconds, so the room clock moves
/// once per second however often the screen is refreshed.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    clock: SecondClock,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let clock = SecondClock::new(ticker.interval());
        Self::with_clock(event_source, ticker, clock)
    }

    /// Use a custom clock, e.g. one that counts every poll as a full second.
    pub fn with_clock(event_source: E, ticker: T, clock: SecondClock) -> Self {
        Self {
            event_source,
            ticker,
            clock,
        }
    }

    /// Drop any partial second, e.g. when a new session starts.
    pub fn restart_clock(&mut self) {
        self.clock.reset();
    }

    /// Blocks up to one poll interval. Returns the next input event, or on
    /// timeout either `Second` or `Tick` depending on the session clock.
    pub fn step(&mut self) -> InterviewEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                match self.clock.on_tick() {
                    0 => InterviewEvent::Tick,
                    secs => InterviewEvent::Second(secs),
                }
            }
        }
    }
}
