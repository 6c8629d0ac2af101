use snaptext_types::CaptureRegion;
use xcap::Monitor;
use xcap::image::RgbaImage;

use crate::error::CaptureError;

/// Source of screen pixels
pub trait ScreenGrabber: Send + Sync {
    /// Grab the pixels under `region` (global physical coordinates)
    fn grab(&self, region: CaptureRegion) -> Result<RgbaImage, CaptureError>;
}

/// Grabs from the monitor the selection started on
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn grab(&self, region: CaptureRegion) -> Result<RgbaImage, CaptureError> {
        capture_screen_region(region)
    }
}

/// List monitors as (name, x, y, width, height)
pub fn list_monitors() -> Result<Vec<(String, i32, i32, u32, u32)>, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::Screen(e.to_string()))?;
    Ok(monitors
        .iter()
        .map(|m| (m.name().to_string(), m.x(), m.y(), m.width(), m.height()))
        .collect())
}

/// Capture a region of the screen
pub fn capture_screen_region(region: CaptureRegion) -> Result<RgbaImage, CaptureError> {
    if region.is_empty() {
        return Err(CaptureError::EmptyRegion {
            width: region.width,
            height: region.height,
        });
    }

    let monitors = Monitor::all().map_err(|e| CaptureError::Screen(e.to_string()))?;

    let monitor = monitors
        .iter()
        .find(|m| {
            region.x >= m.x()
                && region.y >= m.y()
                && (region.x as i64) < m.x() as i64 + m.width() as i64
                && (region.y as i64) < m.y() as i64 + m.height() as i64
        })
        .or(monitors.first())
        .ok_or(CaptureError::NoMonitor)?;

    let bounds = MonitorBounds {
        x: monitor.x(),
        y: monitor.y(),
        width: monitor.width(),
        height: monitor.height(),
    };
    let (left, top, width, height) =
        crop_within(region, bounds).ok_or(CaptureError::EmptyRegion {
            width: 0,
            height: 0,
        })?;

    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::Screen(e.to_string()))?;

    tracing::debug!(
        "Captured monitor {}x{}, cropping {}x{} at ({}, {})",
        image.width(),
        image.height(),
        width,
        height,
        left,
        top
    );

    Ok(xcap::image::imageops::crop_imm(&image, left, top, width, height).to_image())
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MonitorBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Clamp `region` to the monitor and return the crop rectangle in
/// monitor-local pixels, `None` when nothing is left
pub(crate) fn crop_within(region: CaptureRegion, monitor: MonitorBounds) -> Option<(u32, u32, u32, u32)> {
    let mon_right = monitor.x as i64 + monitor.width as i64;
    let mon_bottom = monitor.y as i64 + monitor.height as i64;

    let left = (region.x as i64).max(monitor.x as i64);
    let top = (region.y as i64).max(monitor.y as i64);
    let right = region.right().min(mon_right);
    let bottom = region.bottom().min(mon_bottom);

    if right <= left || bottom <= top {
        return None;
    }

    Some((
        (left - monitor.x as i64) as u32,
        (top - monitor.y as i64) as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}
