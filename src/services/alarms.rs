//! Alarm engine
//!
//! Arms alarm slots from the config store, polls the wall clock, and
//! notifies + re-arms when an occurrence elapses. Runs a background task
//! that checks armed alarms every second.

use std::sync::Arc;

use chrono::{Days, Local, NaiveDateTime};
use tokio::sync::RwLock;

use crate::config;
use crate::error::Result;
use crate::notify::Notifier;
use crate::schedule::{advance_after_fire, next_occurrence, RepeatPolicy};
use crate::store::ConfigStore;

/// One armed alarm slot
#[derive(Debug, Clone)]
struct ArmedAlarm {
    slot: usize,
    title: String,
    comment: String,
    repeat: RepeatPolicy,
    next: NaiveDateTime,
}

/// Alarm service with background scheduler
#[derive(Clone)]
pub struct AlarmService {
    store: ConfigStore,
    notifier: Arc<dyn Notifier>,
    armed: Arc<RwLock<Vec<ArmedAlarm>>>,
}

impl AlarmService {
    pub fn new(store: ConfigStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            armed: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Arm one slot from its persisted entry. Returns the armed instant.
    ///
    /// A one-shot candidate that has already elapsed is pushed one day
    /// forward; repeat policies compute a strictly-future occurrence on
    /// their own.
    pub async fn arm(&self, slot: usize, now: NaiveDateTime) -> Result<NaiveDateTime> {
        let entry = self.store.alarm(slot).await?;

        let mut next = next_occurrence(now, entry.alarm, entry.repeat);
        if next <= now {
            next = next + Days::new(1);
        }

        let mut armed = self.armed.write().await;
        armed.retain(|a| a.slot != slot);
        armed.push(ArmedAlarm {
            slot,
            title: entry.title,
            comment: entry.comment,
            repeat: entry.repeat,
            next,
        });

        tracing::info!("Alarm slot {} armed for {}", slot, next);
        Ok(next)
    }

    /// Arm every slot whose persisted entry is active. Returns the number
    /// of slots armed; individual failures are logged and skipped.
    pub async fn arm_active(&self, now: NaiveDateTime) -> usize {
        let alarms = self.store.get().await.alarms;
        let mut count = 0;
        for (slot, entry) in alarms.iter().enumerate() {
            if !entry.active {
                continue;
            }
            match self.arm(slot, now).await {
                Ok(_) => count += 1,
                Err(e) => tracing::error!("Failed to arm alarm slot {}: {}", slot, e),
            }
        }
        count
    }

    /// Drop a slot from the armed set
    pub async fn disarm(&self, slot: usize) {
        let mut armed = self.armed.write().await;
        let before = armed.len();
        armed.retain(|a| a.slot != slot);
        if armed.len() != before {
            tracing::info!("Alarm slot {} disarmed", slot);
        }
    }

    /// The next occurrence armed for a slot, if any
    pub async fn next_for(&self, slot: usize) -> Option<NaiveDateTime> {
        self.armed
            .read()
            .await
            .iter()
            .find(|a| a.slot == slot)
            .map(|a| a.next)
    }

    /// Fire every armed alarm whose occurrence has elapsed. Repeating
    /// alarms re-arm for their next occurrence; one-shot alarms disarm.
    /// Returns the number of alarms fired.
    pub async fn poll(&self, now: NaiveDateTime) -> usize {
        let mut armed = self.armed.write().await;
        let mut fired = 0;
        let mut idx = 0;

        while idx < armed.len() {
            if armed[idx].next > now {
                idx += 1;
                continue;
            }

            fired += 1;
            let alarm = &armed[idx];
            tracing::info!("Alarm slot {} fired at {}", alarm.slot, alarm.next);

            let title = if alarm.title.is_empty() {
                "Alarm"
            } else {
                alarm.title.as_str()
            };
            if let Err(e) = self.notifier.notify(title, &alarm.comment) {
                tracing::error!("Failed to send alarm notification: {}", e);
            }

            if alarm.repeat.repeats() {
                let next = advance_after_fire(alarm.next, now, alarm.repeat);
                tracing::info!("Alarm slot {} re-armed for {}", alarm.slot, next);
                armed[idx].next = next;
                idx += 1;
            } else {
                tracing::info!("Alarm slot {} completed", alarm.slot);
                armed.remove(idx);
            }
        }

        fired
    }

    /// Start the background scheduler loop
    pub fn start(self) {
        tokio::spawn(async move {
            tracing::info!("Starting alarm scheduler");

            let mut interval = tokio::time::interval(std::time::Duration::from_secs(
                config::ALARM_POLL_INTERVAL_SECS,
            ));

            loop {
                interval.tick().await;
                self.poll(Local::now().naive_local()).await;
            }
        });
    }
}
