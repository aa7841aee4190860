//! Configuration store
//!
//! Persists the RunConfig document as pretty JSON in the data directory.
//! Writes are atomic (temp file + rename) and mutations schedule a
//! debounced save so bursts of geometry updates collapse into one write.

pub mod models;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::config;
use crate::error::{AppError, Result};
use self::models::{AlarmEntry, RunConfig, WindowPersistedState};

/// Shared handle to the persisted configuration
#[derive(Clone)]
pub struct ConfigStore {
    path: PathBuf,
    state: Arc<RwLock<RunConfig>>,
    save_generation: Arc<AtomicU64>,
}

impl ConfigStore {
    /// Open the config document in `data_dir`, creating defaults when the
    /// file does not exist. A corrupt document is an error, not silently
    /// replaced.
    pub async fn load(data_dir: PathBuf) -> Result<Self> {
        let path = data_dir.join(config::CONFIG_FILE_NAME);

        let (run_config, created) = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            let parsed: RunConfig = serde_json::from_str(&content)
                .map_err(|e| AppError::Generic(format!("Failed to parse config: {}", e)))?;
            (parsed, false)
        } else {
            tracing::info!("Config file not found, creating default config");
            (RunConfig::default(), true)
        };

        let store = Self {
            path,
            state: Arc::new(RwLock::new(run_config)),
            save_generation: Arc::new(AtomicU64::new(0)),
        };

        if created {
            store.save_now().await?;
        }

        Ok(store)
    }

    /// Clone of the current document
    pub async fn get(&self) -> RunConfig {
        self.state.read().await.clone()
    }

    /// One persisted alarm slot
    pub async fn alarm(&self, slot: usize) -> Result<AlarmEntry> {
        self.state
            .read()
            .await
            .alarms
            .get(slot)
            .cloned()
            .ok_or(AppError::SlotNotFound(slot))
    }

    /// Replace one alarm slot
    pub async fn update_alarm(&self, slot: usize, entry: AlarmEntry) -> Result<()> {
        {
            let mut state = self.state.write().await;
            let stored = state
                .alarms
                .get_mut(slot)
                .ok_or(AppError::SlotNotFound(slot))?;
            *stored = entry;
        }
        self.save_debounced();
        Ok(())
    }

    /// Update the main window geometry
    pub async fn update_main_window(&self, window: WindowPersistedState) {
        self.mutate(|c| c.window = window).await;
    }

    /// Update the timer window geometry
    pub async fn update_timer_window(&self, window: WindowPersistedState) {
        self.mutate(|c| c.timer.window = window).await;
    }

    /// Update the stopwatch window geometry
    pub async fn update_stopwatch_window(&self, window: WindowPersistedState) {
        self.mutate(|c| c.stopwatch.window = window).await;
    }

    /// Update the options window geometry
    pub async fn update_options_window(&self, window: WindowPersistedState) {
        self.mutate(|c| c.options.window = window).await;
    }

    /// Update the UI theme label
    pub async fn update_theme(&self, theme: String) {
        self.mutate(|c| c.theme = theme).await;
    }

    async fn mutate<F: FnOnce(&mut RunConfig)>(&self, f: F) {
        {
            let mut state = self.state.write().await;
            f(&mut state);
        }
        self.save_debounced();
    }

    /// Write the document to disk immediately: serialize, write to a temp
    /// file next to the target, fsync, rename into place.
    pub async fn save_now(&self) -> Result<()> {
        let content = {
            let state = self.state.read().await;
            serde_json::to_string_pretty(&*state)?
        };

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Config saved to {:?}", self.path);
        Ok(())
    }

    /// Schedule a save after the debounce quiet period. Each call bumps a
    /// generation counter; only the task holding the latest generation
    /// actually writes, so rapid update bursts produce a single save.
    pub fn save_debounced(&self) {
        let generation = self.save_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let store = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(config::SAVE_DEBOUNCE_MS)).await;
            if store.save_generation.load(Ordering::SeqCst) != generation {
                return;
            }
            if let Err(e) = store.save_now().await {
                tracing::error!("Debounced config save failed: {}", e);
            }
        });
    }

    /// Path of the persisted document
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
