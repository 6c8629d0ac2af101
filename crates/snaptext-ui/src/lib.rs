use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use kanal::Sender;
use slint::ComponentHandle;
use snaptext_types::{AppEvent, SelectionPoint};

mod selection;

pub use selection::{SelectionState, region_from_points};

slint::include_modules!();

/// Thread-safe handle used by the backend to drive the overlay
#[derive(Clone)]
pub struct OverlayHandle {
    window: slint::Weak<SelectionOverlay>,
}

impl OverlayHandle {
    /// Show the overlay from any thread
    pub fn show(&self) -> anyhow::Result<()> {
        self.window
            .upgrade_in_event_loop(|w| {
                w.set_selecting(false);
                w.window().set_fullscreen(true);
                if let Err(e) = w.show() {
                    tracing::error!("[SLINT] Failed to show overlay: {}", e);
                } else {
                    tracing::debug!("[SLINT] Overlay shown");
                }
            })
            .context("UI event loop is not running")
    }

    /// Stop the UI event loop from any thread
    pub fn quit(&self) {
        let result = slint::invoke_from_event_loop(|| {
            let _ = slint::quit_event_loop();
        });
        if let Err(e) = result {
            tracing::debug!("[SLINT] Event loop already gone: {}", e);
        }
    }
}

/// Run the UI event loop on the current thread until [`OverlayHandle::quit`]
pub fn run_event_loop() -> anyhow::Result<()> {
    slint::run_event_loop_until_quit().context("UI event loop failed")
}

/// Create the hidden overlay and wire its callbacks to `events`.
///
/// Must be called on the main thread; the returned window has to stay
/// alive for as long as the event loop runs.
pub fn build_overlay(events: Sender<AppEvent>) -> anyhow::Result<(SelectionOverlay, OverlayHandle)> {
    let window = SelectionOverlay::new()?;
    let selection = Rc::new(RefCell::new(SelectionState::default()));

    {
        let selection = selection.clone();
        let window_weak = window.as_weak();
        window.on_pointer_pressed(move |x, y| {
            let mut state = selection.borrow_mut();
            state.press(SelectionPoint::new(x, y));
            if let Some(w) = window_weak.upgrade() {
                sync_rect(&w, &state);
            }
        });
    }

    {
        let selection = selection.clone();
        let window_weak = window.as_weak();
        window.on_pointer_moved(move |x, y| {
            let mut state = selection.borrow_mut();
            if !state.is_active() {
                return;
            }
            state.drag(SelectionPoint::new(x, y));
            if let Some(w) = window_weak.upgrade() {
                sync_rect(&w, &state);
            }
        });
    }

    {
        let selection = selection.clone();
        let window_weak = window.as_weak();
        let events = events.clone();
        window.on_pointer_released(move |x, y| {
            let Some(w) = window_weak.upgrade() else {
                return;
            };
            let finished = selection.borrow_mut().release(SelectionPoint::new(x, y));
            sync_rect(&w, &selection.borrow());

            // Read geometry before hiding, the window may be unmapped after
            let scale = w.window().scale_factor();
            let origin = w.window().position();
            hide(&w);

            let event = match finished {
                Some((start, end)) => {
                    let region = region_from_points(start, end, scale, (origin.x, origin.y));
                    tracing::debug!("[SLINT] Selected {:?}", region);
                    AppEvent::RegionSelected(region)
                }
                None => AppEvent::SelectionCancelled,
            };
            send(&events, event);
        });
    }

    {
        let window_weak = window.as_weak();
        window.on_cancelled(move || {
            selection.borrow_mut().cancel();
            if let Some(w) = window_weak.upgrade() {
                w.set_selecting(false);
                hide(&w);
            }
            send(&events, AppEvent::SelectionCancelled);
        });
    }

    let handle = OverlayHandle {
        window: window.as_weak(),
    };
    Ok((window, handle))
}

fn sync_rect(window: &SelectionOverlay, state: &SelectionState) {
    match state.rect() {
        Some((x, y, width, height)) => {
            window.set_sel_x(x);
            window.set_sel_y(y);
            window.set_sel_width(width);
            window.set_sel_height(height);
            window.set_selecting(true);
        }
        None => window.set_selecting(false),
    }
}

fn hide(window: &SelectionOverlay) {
    window.window().set_fullscreen(false);
    if let Err(e) = window.hide() {
        tracing::warn!("[SLINT] Failed to hide overlay: {}", e);
    }
}

fn send(events: &Sender<AppEvent>, event: AppEvent) {
    match events.try_send(event) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("[SLINT] Event channel full, dropping overlay event"),
        Err(e) => tracing::error!("[SLINT] Failed to send overlay event: {}", e),
    }
}
