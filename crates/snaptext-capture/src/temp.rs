use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;
use xcap::image::{ExtendedColorType, ImageEncoder, RgbaImage};
use xcap::image::codecs::png::PngEncoder;

use crate::error::CaptureError;

/// A captured region stored as a PNG on disk for the duration of one OCR call.
///
/// The file handle is closed as soon as [`CapturedImage::write`] or
/// [`CapturedImage::read_bytes`] returns, so deletion never races an open
/// handle. The file is removed by [`CapturedImage::remove`] or, failing
/// that, when the value is dropped.
#[derive(Debug)]
pub struct CapturedImage {
    path: PathBuf,
    removed: bool,
}

impl CapturedImage {
    /// Encode `image` and write it to a fresh file inside `dir`
    pub fn write(dir: &Path, image: &RgbaImage) -> Result<Self, CaptureError> {
        let png = encode_png(image)?;
        Self::write_with(dir, |path| fs::write(path, &png))
    }

    fn write_with<F>(dir: &Path, write: F) -> Result<Self, CaptureError>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        fs::create_dir_all(dir)?;

        // Guard exists before the first byte lands, a failed write drops it
        let captured = Self {
            path: dir.join(format!("snaptext-{}.png", Uuid::new_v4())),
            removed: false,
        };
        write(&captured.path)?;

        tracing::debug!("Screenshot saved to {}", captured.path.display());
        Ok(captured)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, CaptureError> {
        Ok(fs::read(&self.path)?)
    }

    /// Delete the file, a file that is already gone is not an error
    pub fn remove(mut self) -> Result<(), CaptureError> {
        self.removed = true;
        remove_if_exists(&self.path)?;
        tracing::debug!("Cleaned up {}", self.path.display());
        Ok(())
    }
}

impl Drop for CapturedImage {
    fn drop(&mut self) {
        if !self.removed {
            let _ = remove_if_exists(&self.path);
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}
