use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender, Sender};
use snaptext_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::shutdown_on_ctrl_c;
use crate::pipeline::CapturePipeline;
use crate::state::AppState;
use crate::ui::Overlay;

/// Every producer (hotkey thread, overlay callbacks, ctrl+c) feeds one queue
pub struct ChannelSet {
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            events: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for threads outside the runtime
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.channels.events.0.clone_sync()
    }

    pub fn spawn_tasks(
        &self,
        overlay: Arc<dyn Overlay>,
        pipeline: Arc<CapturePipeline>,
        once: bool,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.events.1.clone(),
            overlay,
            pipeline,
            once,
        ));

        tasks.spawn(shutdown_on_ctrl_c(
            self.channels.events.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
