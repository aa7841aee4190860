// TimeToy - desktop countdown timer, stopwatch and alarm clock engine
// Entry point for the headless runner

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetoy::{app, notify};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timetoy=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TimeToy engine");

    let data_dir = std::env::var_os("TIMETOY_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let notifier = Arc::new(notify::DesktopNotifier);
    let state = app::setup(data_dir, notifier)
        .await
        .expect("error while starting the timetoy engine");

    let armed = state.alarms.arm_active(Local::now().naive_local()).await;
    tracing::info!("{} alarm slot(s) armed", armed);

    state.alarms.clone().start();

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");

    tracing::info!("Shutting down");
    if let Err(e) = state.store.save_now().await {
        tracing::error!("Final config save failed: {}", e);
    }
}
