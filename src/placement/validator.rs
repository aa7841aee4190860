//! Saved-geometry validation and capture
//!
//! Multi-monitor configurations change between sessions (laptop undocked,
//! monitor unplugged); restoring an absolute position blindly can land a
//! window on no visible display. Validation requires a small visible
//! overlap with the virtual screen before honoring a saved position, and
//! otherwise recenters on the primary work area.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::placement::geometry::Rect;

/// Persisted window geometry; any field may be absent when it was never
/// captured. A rect with a missing coordinate counts as "no position".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowRect {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl WindowRect {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: Some(rect.left),
            top: Some(rect.top),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }

    /// The fully-set rectangle, if every field is present
    pub fn as_rect(&self) -> Option<Rect> {
        Some(Rect::new(self.left?, self.top?, self.width?, self.height?))
    }

    /// Whether a usable position is recorded
    pub fn has_position(&self) -> bool {
        self.left.is_some() && self.top.is_some()
    }
}

/// Window state persisted alongside the rectangle, as a string label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl WindowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Minimized => "Minimized",
            Self::Maximized => "Maximized",
        }
    }

    /// Parse a persisted label; anything unrecognized reads as Normal
    pub fn from_label(label: &str) -> Self {
        match label {
            "Minimized" => Self::Minimized,
            "Maximized" => Self::Maximized,
            _ => Self::Normal,
        }
    }
}

/// Substitute probe dimensions for unset or non-positive sizes so a
/// position-only rect can still be tested for visibility
fn probe_size(rect: &WindowRect) -> (f64, f64) {
    let width = rect
        .width
        .filter(|w| *w > 0.0)
        .unwrap_or(config::PLACEMENT_PROBE_WIDTH);
    let height = rect
        .height
        .filter(|h| *h > 0.0)
        .unwrap_or(config::PLACEMENT_PROBE_HEIGHT);
    (width, height)
}

/// Whether the saved rectangle would be visible enough on the current
/// displays to honor its position.
///
/// `display_bounds` is the union rectangle of all active displays. A rect
/// without a position is never on screen; otherwise the intersection with
/// the display bounds must cover at least `min_visible` square units. The
/// threshold tolerates a window that is mostly off-screen as long as the
/// user can still see and drag it.
pub fn is_on_screen(rect: &WindowRect, display_bounds: Rect, min_visible: f64) -> bool {
    let (Some(left), Some(top)) = (rect.left, rect.top) else {
        return false;
    };
    let (width, height) = probe_size(rect);
    let saved = Rect::new(left, top, width, height);
    saved.overlap_area(&display_bounds) >= min_visible
}

/// Decide the effective geometry for a window being restored.
///
/// A saved rect that passes the visibility check is returned unchanged.
/// Anything else (unset, partially set, or off-screen) falls back to a
/// rect centered within `work_area`, with sizes clamped to fit it.
pub fn resolve_placement(saved: &WindowRect, display_bounds: Rect, work_area: Rect) -> WindowRect {
    if is_on_screen(saved, display_bounds, config::MIN_VISIBLE_AREA) {
        return *saved;
    }

    let (width, height) = probe_size(saved);
    let width = width.min(work_area.width);
    let height = height.min(work_area.height);
    WindowRect::from_rect(Rect::new(
        work_area.left + (work_area.width - width) / 2.0,
        work_area.top + (work_area.height - height) / 2.0,
        width,
        height,
    ))
}

/// Snapshot live window geometry into persistable form.
///
/// A maximized or minimized window captures its restore bounds (the
/// geometry it would return to), not its current bounds; persisting a
/// maximized full-screen rectangle as the "normal" position would make
/// the window unrestorable to a sane size.
pub fn capture_current(live: Rect, state: WindowState, restore_bounds: Rect) -> WindowRect {
    match state {
        WindowState::Normal => WindowRect::from_rect(live),
        WindowState::Minimized | WindowState::Maximized => WindowRect::from_rect(restore_bounds),
    }
}
