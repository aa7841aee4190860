//! Notification seam
//!
//! The engines call through this trait when an occurrence elapses.
//! Production posts a desktop notification; tests substitute a recorder.
//! Failures are reported to the caller, which logs and swallows them —
//! a broken notification daemon must never stall the scheduling loop.

use crate::error::{AppError, Result};

/// Delivery of a single elapsed-timer or alarm announcement
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Desktop notifications via the system notification service
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<()> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| AppError::Notification(e.to_string()))
    }
}
