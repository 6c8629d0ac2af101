use snaptext_types::{CaptureRegion, SelectionPoint};

/// Drag state of the overlay, fed by pointer callbacks
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    start: Option<SelectionPoint>,
    current: Option<SelectionPoint>,
}

impl SelectionState {
    pub fn press(&mut self, point: SelectionPoint) {
        self.start = Some(point);
        self.current = Some(point);
    }

    pub fn drag(&mut self, point: SelectionPoint) {
        if self.start.is_some() {
            self.current = Some(point);
        }
    }

    /// Finish the drag, `None` if no press was seen
    pub fn release(&mut self, point: SelectionPoint) -> Option<(SelectionPoint, SelectionPoint)> {
        let start = self.start.take()?;
        self.current = None;
        Some((start, point))
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Rectangle to draw as (x, y, width, height) in logical pixels
    pub fn rect(&self) -> Option<(f32, f32, f32, f32)> {
        let (start, current) = (self.start?, self.current?);
        Some((
            start.x.min(current.x),
            start.y.min(current.y),
            (current.x - start.x).abs(),
            (current.y - start.y).abs(),
        ))
    }
}

/// Map two overlay points to a capture region in global physical pixels
pub fn region_from_points(
    start: SelectionPoint,
    end: SelectionPoint,
    scale_factor: f32,
    origin: (i32, i32),
) -> CaptureRegion {
    CaptureRegion::from_corners(
        start.to_physical(scale_factor, origin),
        end.to_physical(scale_factor, origin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> SelectionPoint {
        SelectionPoint::new(x, y)
    }

    #[test]
    fn test_press_drag_release() {
        let mut state = SelectionState::default();
        state.press(p(10.0, 10.0));
        state.drag(p(50.0, 30.0));
        assert_eq!(state.rect(), Some((10.0, 10.0, 40.0, 20.0)));

        let (start, end) = state.release(p(60.0, 40.0)).unwrap();
        assert_eq!(start, p(10.0, 10.0));
        assert_eq!(end, p(60.0, 40.0));
        assert!(!state.is_active());
        assert_eq!(state.rect(), None);
    }

    #[test]
    fn test_rect_for_upward_drag() {
        let mut state = SelectionState::default();
        state.press(p(100.0, 100.0));
        state.drag(p(40.0, 70.0));
        assert_eq!(state.rect(), Some((40.0, 70.0, 60.0, 30.0)));
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut state = SelectionState::default();
        state.drag(p(5.0, 5.0));
        assert_eq!(state.rect(), None);
        assert!(state.release(p(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_cancel_clears_drag() {
        let mut state = SelectionState::default();
        state.press(p(1.0, 1.0));
        state.cancel();
        assert!(state.release(p(9.0, 9.0)).is_none());
    }

    #[test]
    fn test_click_gives_empty_region() {
        let mut state = SelectionState::default();
        state.press(p(20.0, 20.0));
        let (a, b) = state.release(p(20.0, 20.0)).unwrap();
        assert!(region_from_points(a, b, 1.0, (0, 0)).is_empty());
    }

    #[test]
    fn test_region_uses_scale_and_window_origin() {
        let region = region_from_points(p(110.0, 60.0), p(10.0, 10.0), 2.0, (1920, 0));
        assert_eq!(
            region,
            CaptureRegion {
                x: 1940,
                y: 20,
                width: 200,
                height: 100
            }
        );
    }
}
