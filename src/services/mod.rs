//! Engine services
//!
//! The async alarm engine plus the pure timer and stopwatch state
//! machines it sits beside.

pub mod alarms;
pub mod stopwatch;
pub mod timer;

pub use alarms::AlarmService;
pub use stopwatch::Stopwatch;
pub use timer::{CountdownTimer, TimerPhase};
