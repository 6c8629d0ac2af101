use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use snaptext_capture::{CaptureError, CapturedImage, ScreenGrabber, XcapGrabber};
use snaptext_config::Config;
use snaptext_io::{ClipboardSink, SystemClipboard};
use snaptext_types::{CaptureOutcome, CaptureRegion};
use snaptext_vision::{GeminiRecognizer, Recognizer};

/// capture -> temp file -> OCR -> clipboard -> cleanup, once per selection
pub struct CapturePipeline {
    grabber: Arc<dyn ScreenGrabber>,
    recognizer: Arc<dyn Recognizer>,
    clipboard: Arc<dyn ClipboardSink>,
    temp_dir: PathBuf,
    capture_delay: Duration,
}

impl CapturePipeline {
    pub fn new(
        grabber: Arc<dyn ScreenGrabber>,
        recognizer: Arc<dyn Recognizer>,
        clipboard: Arc<dyn ClipboardSink>,
        temp_dir: PathBuf,
        capture_delay: Duration,
    ) -> Self {
        Self {
            grabber,
            recognizer,
            clipboard,
            temp_dir,
            capture_delay,
        }
    }

    /// Wire the real screen, Gemini and the system clipboard
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let vision = &config.vision;
        let mut recognizer = GeminiRecognizer::new(vision.api_key.clone(), vision.model.clone())
            .with_api_url(vision.api_url.clone())
            .with_prompt(vision.prompt.clone());
        if let Some(secs) = vision.timeout_seconds {
            recognizer = recognizer
                .with_timeout(Duration::from_secs(secs))
                .context("Failed to build HTTP client")?;
        }

        let clipboard = SystemClipboard::new()?;

        Ok(Self::new(
            Arc::new(XcapGrabber),
            Arc::new(recognizer),
            Arc::new(clipboard),
            config.capture.temp_dir(),
            Duration::from_millis(config.capture.capture_delay_ms),
        ))
    }

    pub async fn run(&self, region: CaptureRegion) -> CaptureOutcome {
        if region.is_empty() {
            tracing::info!(
                "Empty selection ({}x{}), nothing to capture",
                region.width,
                region.height
            );
            return CaptureOutcome::EmptySelection;
        }

        if !self.capture_delay.is_zero() {
            tokio::time::sleep(self.capture_delay).await;
        }

        let captured = match self.capture(region).await {
            Ok(captured) => captured,
            Err(e) => {
                if let Some(CaptureError::EmptyRegion { .. }) = e.downcast_ref::<CaptureError>() {
                    tracing::info!("Selection is off screen, nothing to capture");
                    return CaptureOutcome::EmptySelection;
                }
                tracing::error!("Capture failed: {:#}", e);
                return CaptureOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let outcome = self.recognize_and_copy(&captured).await;

        let path = captured.path().to_path_buf();
        if let Err(e) = captured.remove() {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }

        outcome
    }

    async fn capture(&self, region: CaptureRegion) -> anyhow::Result<CapturedImage> {
        let grabber = Arc::clone(&self.grabber);
        let dir = self.temp_dir.clone();

        tokio::task::spawn_blocking(move || {
            let pixels = grabber.grab(region)?;
            let captured = CapturedImage::write(&dir, &pixels)?;
            Ok::<_, anyhow::Error>(captured)
        })
        .await
        .context("Capture task failed")?
    }

    async fn recognize_and_copy(&self, captured: &CapturedImage) -> CaptureOutcome {
        let bytes = match captured.read_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", captured.path().display(), e);
                return CaptureOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let provider = self.recognizer.metadata();
        tracing::info!("Sending image to {} ({}) for OCR", provider.name, provider.model);

        let text = match self.recognizer.recognize(&bytes).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("An error occurred: {}", e);
                return CaptureOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        if text.trim().is_empty() {
            tracing::info!("No text found in selection");
            return CaptureOutcome::NoText;
        }

        match self.clipboard.set_text(&text) {
            Ok(()) => CaptureOutcome::Copied { text },
            Err(e) => {
                tracing::error!("{:#}", e);
                CaptureOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
