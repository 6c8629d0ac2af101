use snaptext_types::CaptureOutcome;

/// Capture counters for the running session
#[derive(Clone, Debug, Default)]
pub struct CaptureStatus {
    pub capture_count: u64,
    pub copied_count: u64,
    pub error_count: u64,
    pub last_outcome: Option<CaptureOutcome>,
}

impl CaptureStatus {
    pub fn record(&mut self, outcome: &CaptureOutcome) {
        match outcome {
            CaptureOutcome::Cancelled => {}
            CaptureOutcome::Copied { .. } => {
                self.capture_count += 1;
                self.copied_count += 1;
            }
            CaptureOutcome::Failed { .. } => {
                self.capture_count += 1;
                self.error_count += 1;
            }
            CaptureOutcome::NoText | CaptureOutcome::EmptySelection => {
                self.capture_count += 1;
            }
        }
        self.last_outcome = Some(outcome.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_by_outcome() {
        let mut status = CaptureStatus::default();
        status.record(&CaptureOutcome::Copied {
            text: "a".to_string(),
        });
        status.record(&CaptureOutcome::Failed {
            reason: "boom".to_string(),
        });
        status.record(&CaptureOutcome::NoText);

        assert_eq!(status.capture_count, 3);
        assert_eq!(status.copied_count, 1);
        assert_eq!(status.error_count, 1);
        assert_eq!(status.last_outcome, Some(CaptureOutcome::NoText));
    }

    #[test]
    fn test_cancel_is_not_a_capture() {
        let mut status = CaptureStatus::default();
        status.record(&CaptureOutcome::Cancelled);
        assert_eq!(status.capture_count, 0);
        assert_eq!(status.last_outcome, Some(CaptureOutcome::Cancelled));
    }
}
