//! Engine configuration constants
//!
//! Central location for configuration constants, resource limits,
//! and validation boundaries used throughout the engine.

// ===== Window Placement =====

/// Minimum intersection area (device-independent units squared) between a
/// saved window rectangle and the virtual screen for the saved position to
/// be honored. Small on purpose: the user only needs enough of the window
/// visible to grab and drag it.
pub const MIN_VISIBLE_AREA: f64 = 16.0;

/// Probe width substituted when a saved rectangle has no usable width
pub const PLACEMENT_PROBE_WIDTH: f64 = 100.0;

/// Probe height substituted when a saved rectangle has no usable height
pub const PLACEMENT_PROBE_HEIGHT: f64 = 100.0;

// ===== Configuration Store =====

/// Config document filename inside the data directory
pub const CONFIG_FILE_NAME: &str = "timetoy.json";

/// Quiet period before a debounced config save hits disk.
/// Bursts of geometry updates within this window collapse into one write.
pub const SAVE_DEBOUNCE_MS: u64 = 500;

// ===== Alarms =====

/// Number of persisted alarm slots
pub const ALARM_SLOT_COUNT: usize = 3;

/// Alarm clock poll cadence in seconds
pub const ALARM_POLL_INTERVAL_SECS: u64 = 1;

// ===== Stopwatch =====

/// Short lead-in countdown offered before launching the stopwatch
pub const LEAD_IN_SHORT_SECS: u32 = 5;

/// Long lead-in countdown offered before launching the stopwatch
pub const LEAD_IN_LONG_SECS: u32 = 10;
