#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Selection is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },

    #[error("No monitor found")]
    NoMonitor,

    #[error("Screen capture failed: {0}")]
    Screen(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] xcap::image::ImageError),

    #[error("Capture file error: {0}")]
    Io(#[from] std::io::Error),
}
