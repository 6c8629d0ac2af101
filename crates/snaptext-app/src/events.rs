use std::collections::VecDeque;
use std::sync::Arc;

use kanal::AsyncReceiver;
use snaptext_types::{AppEvent, CaptureOutcome};

use crate::pipeline::CapturePipeline;
use crate::state::AppState;
use crate::ui::Overlay;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    /// A capture cycle just ended
    Finished,
    Stop,
}

/// App's main loop, runs until shutdown or until the channel closes
pub async fn event_loop(
    state: Arc<AppState>,
    events_rx: AsyncReceiver<AppEvent>,
    overlay: Arc<dyn Overlay>,
    pipeline: Arc<CapturePipeline>,
    once: bool,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Waiting for events");
    let mut pending = VecDeque::new();

    loop {
        let event = match pending.pop_front() {
            Some(event) => event,
            None => match events_rx.recv().await {
                Ok(event) => event,
                Err(_) => {
                    tracing::debug!("[EVENT_LOOP] Channel closed");
                    break;
                }
            },
        };

        tracing::debug!("[EVENT_LOOP] {:?}", event);
        match handle_event(&state, overlay.as_ref(), &pipeline, event).await {
            Flow::Continue => {}
            Flow::Finished if once => break,
            Flow::Finished => drop_stale_presses(&events_rx, &mut pending),
            Flow::Stop => break,
        }
    }

    overlay.quit();
    Ok(())
}

/// Presses queued while the capture was in flight belong to that capture.
/// Anything else is kept in order for the loop.
fn drop_stale_presses(events_rx: &AsyncReceiver<AppEvent>, pending: &mut VecDeque<AppEvent>) {
    let mut dropped = 0;
    while let Ok(Some(event)) = events_rx.try_recv() {
        match event {
            AppEvent::HotkeyPressed => dropped += 1,
            other => pending.push_back(other),
        }
    }
    if dropped > 0 {
        tracing::debug!("Ignored {} hotkey press(es) made during the capture", dropped);
    }
}

async fn handle_event(
    state: &AppState,
    overlay: &dyn Overlay,
    pipeline: &CapturePipeline,
    event: AppEvent,
) -> Flow {
    match event {
        AppEvent::HotkeyPressed => {
            if !state.try_begin_capture() {
                tracing::debug!("Capture already in progress, ignoring hotkey");
                return Flow::Continue;
            }

            tracing::info!("Select a region to capture, Esc to cancel");
            if let Err(e) = overlay.show() {
                tracing::error!("Failed to show selection overlay: {:#}", e);
                state.end_capture(&CaptureOutcome::Cancelled).await;
                return Flow::Finished;
            }
            Flow::Continue
        }
        AppEvent::RegionSelected(region) => {
            tracing::info!(
                "Capturing {}x{} at ({}, {})",
                region.width,
                region.height,
                region.x,
                region.y
            );

            let outcome = pipeline.run(region).await;
            tracing::info!("Capture finished: {}", outcome.label());
            report(&outcome);
            state.end_capture(&outcome).await;
            Flow::Finished
        }
        AppEvent::SelectionCancelled => {
            tracing::info!("Selection cancelled");
            state.end_capture(&CaptureOutcome::Cancelled).await;
            Flow::Finished
        }
        AppEvent::Shutdown => Flow::Stop,
    }
}

/// Print the result block to stdout
fn report(outcome: &CaptureOutcome) {
    match outcome {
        CaptureOutcome::Copied { text } => {
            println!("\n--- OCR Result ---");
            println!("{}", text);
            println!("--------------------");
            println!("Text copied to clipboard!");
        }
        CaptureOutcome::NoText | CaptureOutcome::Failed { .. } => {
            println!("Could not extract text or an error occurred.");
        }
        CaptureOutcome::EmptySelection => {
            println!("Selection was empty, nothing captured.");
        }
        CaptureOutcome::Cancelled => {}
    }
}
