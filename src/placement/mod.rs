//! Window placement validation
//!
//! Decides whether persisted window geometry is usable on the current
//! display configuration and captures live geometry back into persisted
//! form. Pure functions over value types; the host windowing system
//! supplies display bounds and applies the resolved rectangles.

pub mod geometry;
pub mod validator;

pub use geometry::Rect;
pub use validator::{capture_current, is_on_screen, resolve_placement, WindowRect, WindowState};
