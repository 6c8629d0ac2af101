pub mod types;

pub use types::{AppEvent, CaptureOutcome, CaptureRegion, SelectionPoint};
