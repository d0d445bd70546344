use std::time::Duration;

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ticked,
    /// Emitted exactly once, on the tick that brings remaining time to zero.
    Expired,
    /// The timer is stopped; nothing changed.
    Idle,
}

/// Session countdown. `remaining + elapsed` always equals the total duration.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    total_secs: u64,
    remaining_secs: u64,
    running: bool,
}

impl CountdownTimer {
    pub fn new(total_secs: u64) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: total_secs > 0,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked
        }
    }

    /// External cancel. Later ticks are no-ops and never report expiry.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs - self.remaining_secs
    }
}

/// Folds fixed-interval runtime ticks into whole seconds.
#[derive(Debug, Clone)]
pub struct SecondClock {
    tick_ms: u64,
    pending_ms: u64,
}

impl SecondClock {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_ms: tick_interval.as_millis() as u64,
            pending_ms: 0,
        }
    }

    /// Record one runtime tick and return how many whole seconds completed.
    pub fn on_tick(&mut self) -> u64 {
        self.pending_ms += self.tick_ms;
        let secs = self.pending_ms / 1000;
        self.pending_ms %= 1000;
        secs
    }

    pub fn reset(&mut self) {
        self.pending_ms = 0;
    }
}
