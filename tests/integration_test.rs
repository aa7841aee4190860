//! Integration tests for the TimeToy engine
//!
//! These tests verify end-to-end functionality including:
//! - Config persistence round-trips
//! - Window capture/restore across display changes
//! - The alarm arm -> fire -> re-arm flow

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use tempfile::TempDir;

use timetoy::error::Result;
use timetoy::notify::Notifier;
use timetoy::placement::{resolve_placement, Rect, WindowState};
use timetoy::schedule::RepeatPolicy;
use timetoy::services::AlarmService;
use timetoy::store::models::WindowPersistedState;
use timetoy::store::ConfigStore;

/// Notifier double that records every delivery
#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Helper to create a store in a fresh data directory
async fn create_test_store() -> (ConfigStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = ConfigStore::load(temp_dir.path().to_path_buf()).await.unwrap();
    (store, temp_dir)
}

#[tokio::test]
async fn test_config_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();

    // First session: configure an alarm and capture the main window
    {
        let store = ConfigStore::load(dir.clone()).await.unwrap();

        let mut entry = store.alarm(0).await.unwrap();
        entry.active = true;
        entry.title = "Morning".to_string();
        entry.alarm = dt(2024, 1, 8, 7, 0);
        entry.repeat = RepeatPolicy::Weekdays;
        store.update_alarm(0, entry).await.unwrap();

        store
            .update_main_window(WindowPersistedState::capture(
                Rect::new(120.0, 80.0, 900.0, 650.0),
                WindowState::Normal,
                Rect::new(0.0, 0.0, 0.0, 0.0),
            ))
            .await;

        store.save_now().await.unwrap();
    }

    // Second session: everything is back
    {
        let store = ConfigStore::load(dir).await.unwrap();
        let config = store.get().await;

        assert!(config.alarms[0].active);
        assert_eq!(config.alarms[0].title, "Morning");
        assert_eq!(config.alarms[0].repeat, RepeatPolicy::Weekdays);
        assert_eq!(config.window.rect.left, Some(120.0));
        assert_eq!(config.window.state, "Normal");
    }
}

#[tokio::test]
async fn test_window_restore_after_monitor_change() {
    let (store, _temp) = create_test_store().await;

    // Captured on a wide multi-monitor desktop, far to the left
    let captured = WindowPersistedState::capture(
        Rect::new(-1800.0, 200.0, 800.0, 600.0),
        WindowState::Normal,
        Rect::new(0.0, 0.0, 0.0, 0.0),
    );
    store.update_timer_window(captured).await;

    // Restored on a single 1920x1080 display: the saved position is
    // invisible, so placement falls back to centered
    let display = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let work_area = Rect::new(0.0, 0.0, 1920.0, 1040.0);

    let saved = store.get().await.timer.window;
    let resolved = saved.resolve(display, work_area);
    let rect = resolved.as_rect().unwrap();
    assert!(work_area.contains(&rect));
    assert_eq!(rect.left, (1920.0 - 800.0) / 2.0);

    // The same geometry restored on the original desktop is untouched
    let wide_display = Rect::new(-1920.0, 0.0, 3840.0, 1080.0);
    let resolved = saved.resolve(wide_display, work_area);
    assert_eq!(resolved, saved.rect);
}

#[tokio::test]
async fn test_maximized_capture_resolves_to_restore_bounds() {
    let display = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let work_area = Rect::new(0.0, 0.0, 1920.0, 1040.0);

    let captured = WindowPersistedState::capture(
        Rect::new(0.0, 0.0, 1920.0, 1080.0),
        WindowState::Maximized,
        Rect::new(400.0, 300.0, 800.0, 500.0),
    );

    assert_eq!(captured.state, "Maximized");
    let resolved = resolve_placement(&captured.rect, display, work_area);
    assert_eq!(resolved, captured.rect);
    assert_eq!(resolved.as_rect().unwrap().left, 400.0);
}

#[tokio::test]
async fn test_alarm_end_to_end_daily() {
    let (store, _temp) = create_test_store().await;

    let mut entry = store.alarm(1).await.unwrap();
    entry.active = true;
    entry.title = "Lunch".to_string();
    entry.comment = "Step away from the desk".to_string();
    entry.alarm = dt(2024, 1, 8, 12, 30);
    entry.repeat = RepeatPolicy::Daily;
    store.update_alarm(1, entry).await.unwrap();

    let recorder = Arc::new(RecordingNotifier::default());
    let service = AlarmService::new(store, recorder.clone());

    let armed = service.arm_active(dt(2024, 1, 8, 9, 0)).await;
    assert_eq!(armed, 1);

    // Poll through the morning: nothing fires
    assert_eq!(service.poll(dt(2024, 1, 8, 12, 29)).await, 0);

    // The occurrence elapses
    assert_eq!(service.poll(dt(2024, 1, 8, 12, 30)).await, 1);
    let messages = recorder.messages();
    assert_eq!(messages, vec![("Lunch".to_string(), "Step away from the desk".to_string())]);

    // Re-armed for tomorrow; polling again today stays quiet
    assert_eq!(service.next_for(1).await, Some(dt(2024, 1, 9, 12, 30)));
    assert_eq!(service.poll(dt(2024, 1, 8, 23, 59)).await, 0);

    // Tomorrow it fires again
    assert_eq!(service.poll(dt(2024, 1, 9, 12, 30)).await, 1);
    assert_eq!(recorder.messages().len(), 2);
}

#[tokio::test]
async fn test_weekly_alarm_skips_to_next_week_when_passed() {
    let (store, _temp) = create_test_store().await;

    let mut entry = store.alarm(0).await.unwrap();
    entry.active = true;
    entry.alarm = dt(2024, 1, 1, 9, 0);
    entry.repeat = RepeatPolicy::Weekly(Weekday::Mon);
    store.update_alarm(0, entry).await.unwrap();

    let recorder = Arc::new(RecordingNotifier::default());
    let service = AlarmService::new(store, recorder);

    // Monday 23:30 with the 09:00 slot long gone: a week out
    let next = service.arm(0, dt(2024, 1, 8, 23, 30)).await.unwrap();
    assert_eq!(next, dt(2024, 1, 15, 9, 0));
}

#[tokio::test]
async fn test_notifier_failure_does_not_stop_polling() {
    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn notify(&self, _title: &str, _body: &str) -> Result<()> {
            Err(timetoy::error::AppError::Notification(
                "no notification daemon".to_string(),
            ))
        }
    }

    let (store, _temp) = create_test_store().await;

    let mut entry = store.alarm(0).await.unwrap();
    entry.active = true;
    entry.alarm = dt(2024, 1, 8, 9, 0);
    entry.repeat = RepeatPolicy::Daily;
    store.update_alarm(0, entry).await.unwrap();

    let service = AlarmService::new(store, Arc::new(FailingNotifier));
    service.arm(0, dt(2024, 1, 8, 8, 0)).await.unwrap();

    // The failure is swallowed and the alarm still re-arms
    assert_eq!(service.poll(dt(2024, 1, 8, 9, 0)).await, 1);
    assert_eq!(service.next_for(0).await, Some(dt(2024, 1, 9, 9, 0)));
}
