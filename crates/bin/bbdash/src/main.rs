//! # bbdash — BlueBrain dashboard console
//!
//! Composition root that wires the adapters together and runs the
//! interactive terminal dashboard.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Construct the HTTP device adapter and the terminal view
//! - Construct the controller, injecting both via port traits
//! - Start the status poller
//! - Run the event loop: redraw ticks and keyboard input
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use bbdash_adapter_device_http::HttpDeviceApi;
use bbdash_adapter_term::view::{TermView, TerminalGuard};
use bbdash_adapter_term::{InputSignal, map_key, spawn_input_reader};
use bbdash_app::controller::DashboardController;
use bbdash_app::poller::StatusPoller;
use bbdash_app::ports::view::{DashboardView, Panel};

use crate::config::Config;

/// Where a downloaded training dataset lands.
const DATASET_PATH: &str = "training_data.csv";

/// Cadence of full-screen repaints.
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // The terminal owns stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(device = %config.device_url(), "starting dashboard");

    let api = Arc::new(HttpDeviceApi::new(config.device_url()));
    let view = Arc::new(Mutex::new(TermView::new(std::io::stdout())));
    let mut controller = DashboardController::new(Arc::clone(&api), Arc::clone(&view));

    let _poller = StatusPoller::start(api, Arc::clone(&view), config.poll_interval());

    let _guard = TerminalGuard::enter()?;
    view.lock().show_panel(Panel::Dashboard);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let _input = spawn_input_reader(tx);

    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    loop {
        tokio::select! {
            _ = redraw.tick() => {
                view.lock().draw()?;
            }
            Some(key) = rx.recv() => {
                let checkbox_focused =
                    controller.panel() == Panel::Config && controller.focus().is_checkbox();
                match map_key(key, controller.panel(), checkbox_focused) {
                    Some(InputSignal::Quit) => break,
                    Some(InputSignal::DownloadDataset) => {
                        download_dataset(&mut controller, &view).await;
                    }
                    Some(InputSignal::Ui(event)) => {
                        if let Err(err) = controller.handle(event).await {
                            // Already surfaced on the view's message line.
                            tracing::debug!(%err, "operation failed");
                        }
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}

/// Fetch the on-device dataset and write it next to the binary.
async fn download_dataset(
    controller: &mut DashboardController<HttpDeviceApi, TermView<Stdout>>,
    view: &Arc<Mutex<TermView<Stdout>>>,
) {
    let Ok(bytes) = controller.download_dataset().await else {
        // Failure is already on the message line.
        return;
    };
    match std::fs::write(DATASET_PATH, &bytes) {
        Ok(()) => {
            view.lock()
                .acknowledge(&format!("Dataset saved to {DATASET_PATH}."));
        }
        Err(err) => {
            tracing::warn!(%err, path = DATASET_PATH, "failed to write dataset");
        }
    }
}
