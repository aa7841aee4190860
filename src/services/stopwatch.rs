//! Stopwatch
//!
//! Accumulates elapsed time across start/stop runs. The lap control
//! freezes the displayed value while the watch keeps running, matching
//! the original's behavior. Pure over injected instants.

use chrono::{Duration, NaiveDateTime};

/// Stopwatch with a freezable display
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started_at: Option<NaiveDateTime>,
    accumulated: Duration,
    frozen_display: Option<Duration>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Begin (or continue) measuring; no-op while already running
    pub fn start(&mut self, now: NaiveDateTime) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Stop measuring, folding the current run into the accumulated total
    pub fn stop(&mut self, now: NaiveDateTime) {
        if let Some(started) = self.started_at.take() {
            self.accumulated = self.accumulated + (now - started).max(Duration::zero());
        }
    }

    /// Clear everything, including a frozen display
    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::zero();
        self.frozen_display = None;
    }

    /// Total measured time up to `now`
    pub fn elapsed(&self, now: NaiveDateTime) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + (now - started).max(Duration::zero()),
            None => self.accumulated,
        }
    }

    /// Lap control: freeze the display at the current elapsed value, or
    /// release a frozen display. The watch keeps running either way.
    pub fn toggle_freeze(&mut self, now: NaiveDateTime) {
        self.frozen_display = match self.frozen_display {
            Some(_) => None,
            None => Some(self.elapsed(now)),
        };
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_display.is_some()
    }

    /// The value to show: the frozen lap value if set, live elapsed otherwise
    pub fn display(&self, now: NaiveDateTime) -> Duration {
        self.frozen_display.unwrap_or_else(|| self.elapsed(now))
    }
}

/// Format an elapsed span as hh:mm:ss.cc (hundredths)
pub fn format_elapsed(span: Duration) -> String {
    let millis = span.num_milliseconds().max(0);
    let total_secs = millis / 1000;
    format!(
        "{:02}:{:02}:{:02}.{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        (millis % 1000) / 10
    )
}

/// The spoken/displayed lead-in countdown before launching the watch:
/// "5", "4", ..., "1", then "Go!". The caller owns the pacing.
pub fn lead_in_announcements(seconds: u32) -> Vec<String> {
    let mut steps: Vec<String> = (1..=seconds).rev().map(|n| n.to_string()).collect();
    steps.push("Go!".to_string());
    steps
}
