//! Countdown timer state machine
//!
//! Pure over injected instants: the caller supplies `now` on every
//! transition and drives ticking, so the machine is deterministic and
//! testable without touching the wall clock.

use chrono::{Duration, NaiveDateTime};

/// Lifecycle of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// No duration selected
    Zero,
    /// Duration selected, not started
    Ready,
    /// Counting down toward the deadline
    Going,
    /// Suspended with a remaining span stored
    Paused,
    /// Expired or ended by the user
    Ended,
}

/// Countdown timer
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    phase: TimerPhase,
    pending: Duration,
    last_selected: Duration,
    deadline: Option<NaiveDateTime>,
    paused_remaining: Duration,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Zero,
            pending: Duration::zero(),
            last_selected: Duration::zero(),
            deadline: None,
            paused_remaining: Duration::zero(),
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Add to the selected duration. While counting down this pushes the
    /// deadline out by the same amount; while paused it grows the stored
    /// remaining span.
    pub fn add(&mut self, amount: Duration) {
        match self.phase {
            TimerPhase::Going => {
                if let Some(deadline) = self.deadline {
                    self.deadline = Some(deadline + amount);
                }
            }
            TimerPhase::Paused => {
                self.paused_remaining = self.paused_remaining + amount;
            }
            _ => {
                self.pending = self.pending + amount;
                self.sync_idle_phase();
            }
        }
    }

    /// Replace the selected duration; ignored while counting down
    pub fn set(&mut self, duration: Duration) {
        if matches!(self.phase, TimerPhase::Going | TimerPhase::Paused) {
            return;
        }
        self.pending = duration.max(Duration::zero());
        self.sync_idle_phase();
    }

    fn sync_idle_phase(&mut self) {
        self.phase = if self.pending > Duration::zero() {
            TimerPhase::Ready
        } else {
            TimerPhase::Zero
        };
    }

    /// Start counting down. No-op (returns false) with nothing selected
    /// or while already running.
    pub fn start(&mut self, now: NaiveDateTime) -> bool {
        if matches!(self.phase, TimerPhase::Going | TimerPhase::Paused) {
            return false;
        }
        if self.pending <= Duration::zero() {
            return false;
        }
        self.last_selected = self.pending;
        self.deadline = Some(now + self.pending);
        self.phase = TimerPhase::Going;
        true
    }

    /// Advance the clock. Returns true exactly once, on the tick where
    /// the deadline is reached; the caller notifies on that tick.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        if self.phase != TimerPhase::Going {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.phase = TimerPhase::Ended;
                self.deadline = None;
                self.pending = Duration::zero();
                true
            }
            _ => false,
        }
    }

    /// Suspend, storing the remaining span
    pub fn pause(&mut self, now: NaiveDateTime) {
        if self.phase != TimerPhase::Going {
            return;
        }
        self.paused_remaining = self
            .deadline
            .map(|deadline| (deadline - now).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);
        self.phase = TimerPhase::Paused;
    }

    /// Resume from pause; the deadline is re-derived from the stored span
    pub fn resume(&mut self, now: NaiveDateTime) {
        if self.phase != TimerPhase::Paused {
            return;
        }
        self.deadline = Some(now + self.paused_remaining);
        self.phase = TimerPhase::Going;
    }

    /// Stop without firing
    pub fn end(&mut self) {
        if matches!(self.phase, TimerPhase::Going | TimerPhase::Paused) {
            self.phase = TimerPhase::Ended;
            self.deadline = None;
            self.pending = Duration::zero();
        }
    }

    /// Restore the last started duration and start again
    pub fn repeat(&mut self, now: NaiveDateTime) -> bool {
        if matches!(self.phase, TimerPhase::Going | TimerPhase::Paused) {
            return false;
        }
        self.pending = self.last_selected;
        self.sync_idle_phase();
        self.start(now)
    }

    /// Remaining span for display; never negative
    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        match self.phase {
            TimerPhase::Going => self
                .deadline
                .map(|deadline| (deadline - now).max(Duration::zero()))
                .unwrap_or_else(Duration::zero),
            TimerPhase::Paused => self.paused_remaining,
            _ => self.pending,
        }
    }

    /// Remaining span formatted as hh:mm:ss
    pub fn display(&self, now: NaiveDateTime) -> String {
        format_hms(self.remaining(now))
    }
}

/// Format a span as hh:mm:ss, clamping negatives to zero
pub fn format_hms(span: Duration) -> String {
    let total = span.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Parse colon-separated timer input: "s", "m:s" or "h:m:s"
pub fn parse_duration(input: &str) -> Option<Duration> {
    let parts: Vec<&str> = input.split(':').collect();
    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        let value: i64 = part.trim().parse().ok()?;
        if value < 0 {
            return None;
        }
        values.push(value);
    }
    match values.as_slice() {
        [seconds] => Some(Duration::seconds(*seconds)),
        [minutes, seconds] => Some(Duration::seconds(minutes * 60 + seconds)),
        [hours, minutes, seconds] => {
            Some(Duration::seconds(hours * 3600 + minutes * 60 + seconds))
        }
        _ => None,
    }
}
