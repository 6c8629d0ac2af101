use snaptext_ui::OverlayHandle;

/// What the event loop needs from the selection overlay
pub trait Overlay: Send + Sync {
    fn show(&self) -> anyhow::Result<()>;

    /// Stop the UI event loop
    fn quit(&self);
}

impl Overlay for OverlayHandle {
    fn show(&self) -> anyhow::Result<()> {
        OverlayHandle::show(self)
    }

    fn quit(&self) {
        OverlayHandle::quit(self)
    }
}
