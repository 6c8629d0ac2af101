use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Capture hotkey was pressed
    HotkeyPressed,
    /// Overlay finished a drag, region is in global physical pixels
    RegionSelected(CaptureRegion),
    SelectionCancelled,
    Shutdown,
}

/// Result of one hotkey-to-clipboard run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Copied { text: String },
    NoText,
    Failed { reason: String },
    EmptySelection,
    Cancelled,
}

impl CaptureOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CaptureOutcome::Copied { .. } => "copied",
            CaptureOutcome::NoText => "no text",
            CaptureOutcome::Failed { .. } => "failed",
            CaptureOutcome::EmptySelection => "empty selection",
            CaptureOutcome::Cancelled => "cancelled",
        }
    }
}

/// Pointer position inside the overlay, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPoint {
    pub x: f32,
    pub y: f32,
}

impl SelectionPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to global physical pixels
    pub fn to_physical(self, scale_factor: f32, origin: (i32, i32)) -> (i32, i32) {
        (
            origin.0 + (self.x * scale_factor).round() as i32,
            origin.1 + (self.y * scale_factor).round() as i32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    /// Build a region from two opposite corners in any drag direction
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: a.0.abs_diff(b.0),
            height: a.1.abs_diff(b.1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_top_left_to_bottom_right() {
        let region = CaptureRegion::from_corners((10, 20), (110, 70));
        assert_eq!(
            region,
            CaptureRegion {
                x: 10,
                y: 20,
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_from_corners_normalizes_reverse_drag() {
        let forward = CaptureRegion::from_corners((10, 20), (110, 70));
        let backward = CaptureRegion::from_corners((110, 70), (10, 20));
        let diagonal = CaptureRegion::from_corners((110, 20), (10, 70));
        assert_eq!(forward, backward);
        assert_eq!(forward, diagonal);
    }

    #[test]
    fn test_from_corners_negative_coordinates() {
        // Monitors left of the primary have negative x
        let region = CaptureRegion::from_corners((-300, 5), (-100, 25));
        assert_eq!(region.x, -300);
        assert_eq!(region.width, 200);
        assert_eq!(region.right(), -100);
    }

    #[test]
    fn test_click_without_drag_is_empty() {
        assert!(CaptureRegion::from_corners((42, 42), (42, 42)).is_empty());
        assert!(CaptureRegion::from_corners((0, 0), (50, 0)).is_empty());
        assert!(!CaptureRegion::from_corners((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn test_point_to_physical_applies_scale_and_origin() {
        let point = SelectionPoint::new(100.0, 50.5);
        assert_eq!(point.to_physical(1.0, (0, 0)), (100, 51));
        assert_eq!(point.to_physical(1.5, (0, 0)), (150, 76));
        assert_eq!(point.to_physical(2.0, (1920, -40)), (2120, 61));
    }

    #[test]
    fn test_outcome_labels() {
        let copied = CaptureOutcome::Copied {
            text: "hi".to_string(),
        };
        assert_eq!(copied.label(), "copied");
        assert_eq!(CaptureOutcome::NoText.label(), "no text");
    }
}
