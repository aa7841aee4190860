//! Application state and initialization
//!
//! All long-lived services are built here and handed to the runner.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::notify::Notifier;
use crate::services::AlarmService;
use crate::store::ConfigStore;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub store: ConfigStore,
    pub alarms: AlarmService,
}

/// Application setup - called once on startup
pub async fn setup(data_dir: PathBuf, notifier: Arc<dyn Notifier>) -> Result<AppState> {
    tracing::info!("Initializing engine, data directory: {:?}", data_dir);

    std::fs::create_dir_all(&data_dir)?;

    let store = ConfigStore::load(data_dir).await?;
    let alarms = AlarmService::new(store.clone(), notifier);

    tracing::info!("Engine initialized successfully");

    Ok(AppState { store, alarms })
}
