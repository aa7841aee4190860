//! Persisted configuration document
//!
//! The JSON shapes written by the config store. Every field is
//! serde-defaulted so documents written by older builds keep loading.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::placement::geometry::Rect;
use crate::placement::validator::{capture_current, resolve_placement, WindowRect, WindowState};
use crate::schedule::repeat::RepeatPolicy;

/// How an elapsed timer or alarm announces itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    None,
    Sound,
    #[default]
    Voice,
}

/// Saved geometry plus the window-state label it was captured under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPersistedState {
    #[serde(flatten)]
    pub rect: WindowRect,
    #[serde(default = "default_state_label")]
    pub state: String,
}

fn default_state_label() -> String {
    WindowState::Normal.as_str().to_string()
}

impl Default for WindowPersistedState {
    fn default() -> Self {
        Self {
            rect: WindowRect::default(),
            state: default_state_label(),
        }
    }
}

impl WindowPersistedState {
    /// Snapshot a live window. The state label is always recorded;
    /// maximized/minimized windows persist their restore bounds.
    pub fn capture(live: Rect, state: WindowState, restore_bounds: Rect) -> Self {
        Self {
            rect: capture_current(live, state, restore_bounds),
            state: state.as_str().to_string(),
        }
    }

    /// Effective geometry for restoring this window on the current displays
    pub fn resolve(&self, display_bounds: Rect, work_area: Rect) -> WindowRect {
        resolve_placement(&self.rect, display_bounds, work_area)
    }

    pub fn window_state(&self) -> WindowState {
        WindowState::from_label(&self.state)
    }
}

/// One persisted alarm slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmEntry {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub title: String,
    /// Candidate instant: the picked date at the picked time-of-day.
    /// Repeat policies only use the time-of-day component.
    #[serde(default = "default_alarm_instant")]
    pub alarm: NaiveDateTime,
    #[serde(default)]
    pub notification: NotificationKind,
    #[serde(default = "default_alarm_comment")]
    pub comment: String,
    #[serde(default)]
    pub repeat: RepeatPolicy,
    #[serde(default)]
    pub window: WindowPersistedState,
}

fn default_alarm_instant() -> NaiveDateTime {
    // Epoch placeholder; an inactive slot is never armed
    NaiveDateTime::default()
}

fn default_alarm_comment() -> String {
    "Alarm Time Is Up".to_string()
}

impl Default for AlarmEntry {
    fn default() -> Self {
        Self {
            active: false,
            title: String::new(),
            alarm: default_alarm_instant(),
            notification: NotificationKind::default(),
            comment: default_alarm_comment(),
            repeat: RepeatPolicy::default(),
            window: WindowPersistedState::default(),
        }
    }
}

/// Countdown timer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default)]
    pub notification: NotificationKind,
    #[serde(default = "default_timer_comment")]
    pub comment: String,
    #[serde(default)]
    pub window: WindowPersistedState,
}

fn default_timer_comment() -> String {
    "Timer Is Up".to_string()
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            notification: NotificationKind::default(),
            comment: default_timer_comment(),
            window: WindowPersistedState::default(),
        }
    }
}

/// Stopwatch options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopwatchSettings {
    /// Whether the lead-in countdown is announced through the notifier
    #[serde(default)]
    pub announce_countdown: bool,
    #[serde(default)]
    pub window: WindowPersistedState,
}

/// Options window state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionsSettings {
    #[serde(default)]
    pub window: WindowPersistedState,
}

/// The complete persisted application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub stopwatch: StopwatchSettings,
    #[serde(default)]
    pub options: OptionsSettings,
    /// Main window geometry
    #[serde(default)]
    pub window: WindowPersistedState,
    #[serde(default = "default_alarm_slots")]
    pub alarms: Vec<AlarmEntry>,
}

fn default_theme() -> String {
    "Dark".to_string()
}

fn default_alarm_slots() -> Vec<AlarmEntry> {
    vec![AlarmEntry::default(); config::ALARM_SLOT_COUNT]
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            timer: TimerSettings::default(),
            stopwatch: StopwatchSettings::default(),
            options: OptionsSettings::default(),
            window: WindowPersistedState::default(),
            alarms: default_alarm_slots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.theme, "Dark");
        assert_eq!(config.alarms.len(), 3);
        assert!(!config.alarms[0].active);
        assert_eq!(config.timer.comment, "Timer Is Up");
        assert_eq!(config.window.state, "Normal");
        assert!(!config.window.rect.has_position());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let mut config = RunConfig::default();
        config.theme = "Light".to_string();
        config.alarms[1].active = true;
        config.alarms[1].title = "Wake up".to_string();
        config.alarms[1].repeat = RepeatPolicy::Daily;
        config.window = WindowPersistedState::capture(
            Rect::new(10.0, 20.0, 800.0, 600.0),
            WindowState::Normal,
            Rect::new(0.0, 0.0, 0.0, 0.0),
        );

        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_empty_document_loads_defaults() {
        let config: RunConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_partial_window_state_tolerated() {
        // A document with only some geometry fields must still load,
        // and the partial rect counts as position-unset.
        let json = r#"{"window": {"left": 100.0, "state": "Normal"}}"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.window.rect.left, Some(100.0));
        assert_eq!(config.window.rect.top, None);
        assert!(!config.window.rect.has_position());
    }

    #[test]
    fn test_persisted_state_label_round_trip() {
        let state = WindowPersistedState::capture(
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
            WindowState::Maximized,
            Rect::new(100.0, 100.0, 800.0, 600.0),
        );
        assert_eq!(state.state, "Maximized");
        assert_eq!(state.window_state(), WindowState::Maximized);
        // Restore bounds were captured, not the maximized rect
        assert_eq!(state.rect.width, Some(800.0));
    }
}
