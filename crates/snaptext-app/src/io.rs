use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Context;
use kanal::{AsyncSender, Sender};
use snaptext_capture::HotkeyListener;
use snaptext_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Block a dedicated thread on the global hotkey and forward presses
/// that arrive while no capture is in flight
pub fn spawn_hotkey_listener(
    listener: HotkeyListener,
    state: Arc<AppState>,
    event_tx: Sender<AppEvent>,
) -> anyhow::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("hotkey-listener".to_string())
        .spawn(move || {
            loop {
                if let Err(e) = listener.wait() {
                    tracing::error!("Hotkey listener stopped: {:#}", e);
                    break;
                }

                if state.is_capturing() {
                    tracing::debug!("Capture already in progress, ignoring hotkey");
                    continue;
                }

                tracing::info!("Capture hotkey pressed");
                if event_tx.send(AppEvent::HotkeyPressed).is_err() {
                    tracing::debug!("Event channel closed, hotkey listener exiting");
                    break;
                }
            }
        })
        .context("Failed to spawn hotkey listener thread")
}

/// Turn Ctrl+C into a shutdown event
pub async fn shutdown_on_ctrl_c(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
            let _ = event_tx.send(AppEvent::Shutdown).await;
        }
        _ = cancel.cancelled() => {}
    }

    Ok(())
}
