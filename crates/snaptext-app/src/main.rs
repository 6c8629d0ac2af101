use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use snaptext_capture::HotkeyManager;
use snaptext_config::Config;
use snaptext_types::AppEvent;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::controller::AppController;
use crate::pipeline::CapturePipeline;
use crate::state::AppState;
use crate::ui::Overlay;

mod controller;
mod events;
mod io;
mod pipeline;
mod state;
mod status;
mod ui;


/// Select a screen region and copy the text in it to the clipboard
#[derive(Parser, Debug)]
#[command(name = "snaptext", version, about)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Capture hotkey, e.g. "ctrl+shift+x"
    #[arg(long)]
    hotkey: Option<String>,

    /// Gemini model name
    #[arg(short, long)]
    model: Option<String>,

    /// Open the overlay right away and exit after one capture
    #[arg(long)]
    once: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {}", e);
    }

    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(hotkey) = args.hotkey {
        config.hotkey.trigger = hotkey;
    }
    if let Some(model) = args.model {
        config.vision.model = model;
    }
    config.validate()?;
    tracing::debug!("Config: {:?}", config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("snaptext-worker")
        .build()
        .context("Failed to start async runtime")?;
    let _guard = runtime.enter();

    let pipeline = Arc::new(CapturePipeline::from_config(&config)?);
    let trigger = config.hotkey.trigger.clone();
    let state = Arc::new(AppState::new());
    let controller = AppController::new(state.clone());

    // The overlay and the hotkey registration both belong to the main thread
    let (_window, handle) = snaptext_ui::build_overlay(controller.event_sender())?;
    let overlay: Arc<dyn Overlay> = Arc::new(handle);

    let _hotkey = if args.once {
        controller.event_sender().send(AppEvent::HotkeyPressed)?;
        None
    } else {
        let manager = HotkeyManager::register(&trigger)?;
        io::spawn_hotkey_listener(
            manager.listener(),
            state.clone(),
            controller.event_sender(),
        )?;
        println!("snaptext is running. Press '{}' to capture screen text.", trigger);
        Some(manager)
    };

    let mut tasks = controller.spawn_tasks(overlay, pipeline, args.once);

    if let Err(e) = snaptext_ui::run_event_loop() {
        tracing::error!("{:#}", e);
    }

    tracing::info!("Shutting down");
    controller.shutdown();
    let _ = controller.event_sender().try_send(AppEvent::Shutdown);

    runtime.block_on(async {
        let drain = async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                    Err(e) => tracing::error!("Task panicked: {}", e),
                }
            }
        };
        if tokio::time::timeout(Duration::from_secs(2), drain).await.is_err() {
            tracing::warn!("Tasks did not stop in time");
        }

        let status = state.status.read().await;
        tracing::info!(
            "Session: {} captures, {} copied, {} failed, last: {}",
            status.capture_count,
            status.copied_count,
            status.error_count,
            status.last_outcome.as_ref().map_or("none", |o| o.label())
        );
    });

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
