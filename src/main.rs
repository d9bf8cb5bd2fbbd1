// Matchup entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config, resolve the sport domain (CLI arg overrides config)
// 3. Build the API client
// 4. Create mpsc channels
// 5. Spawn the app orchestrator task
// 6. Run the TUI event loop (blocking until the user quits)
// 7. Cleanup on exit

use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use matchup::api::ApiClient;
use matchup::app;
use matchup::config;
use matchup::sport::Sport;
use matchup::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("matchup starting up");

    let config = config::load_config().context("failed to load configuration")?;

    let sport = match std::env::args().nth(1) {
        Some(arg) => Sport::from_arg(&arg).ok_or_else(|| {
            anyhow::anyhow!("unknown sport `{arg}` (expected general, mma or nba)")
        })?,
        None => config.client.sport,
    };
    info!(
        sport = sport.label(),
        base_url = %config.server.base_url,
        "config loaded"
    );

    let api = ApiClient::new(
        &config.server.base_url,
        sport,
        Duration::from_secs(config.client.request_timeout_secs),
    )
    .context("failed to build API client")?;

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (fetch_tx, fetch_rx) = mpsc::channel(256);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let state = app::AppState::new(config, sport, api, fetch_tx);

    // App logic task; the TUI keeps the main task.
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, fetch_rx, ui_tx, state).await {
            error!("application loop error: {e}");
        }
    });

    // Blocks until the user quits. Dropping cmd_tx on exit also winds down
    // the app loop.
    if let Err(e) = tui::run(ui_rx, cmd_tx, sport).await {
        error!("TUI error: {e}");
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), app_handle).await;

    info!("matchup shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("matchup.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("matchup=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
