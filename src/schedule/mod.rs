//! Alarm occurrence scheduling
//!
//! Pure wall-clock date arithmetic: repeat policies and the computation
//! of the next instant an alarm should fire.

pub mod occurrence;
pub mod repeat;

pub use occurrence::{advance_after_fire, next_occurrence};
pub use repeat::RepeatPolicy;
