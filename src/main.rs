use crossterm::event::EventStream;
use quote_board::{
    app, constants::REFRESH_INTERVAL_SECS, display::TerminalDisplay, logging, providers,
    store::SnapshotStore, Refresher,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Some(log_path) = logging::init_file_logging(Level::INFO) {
        tracing::info!(log = %log_path.display(), "Logging initialized");
    }

    let provider = providers::from_env()?;
    let store = Arc::new(SnapshotStore::with_default_instruments());
    let mut refresher = Refresher::new(store, provider);

    let mut display = TerminalDisplay::init().map_err(|e| {
        tracing::error!(error = %e, "Display initialization failed");
        e
    })?;

    let result = app::run(
        &mut refresher,
        &mut display,
        EventStream::new(),
        Duration::from_secs(REFRESH_INTERVAL_SECS),
    )
    .await;

    // restore the terminal before any error is printed
    drop(display);

    if let Err(e) = &result {
        tracing::error!(error = %e, "Quote board stopped");
    }
    result?;
    tracing::info!("Quote board exited");
    Ok(())
}
