mod capture;
mod error;
mod hotkey;
mod temp;

pub use capture::{ScreenGrabber, XcapGrabber, capture_screen_region, list_monitors};
pub use error::CaptureError;
pub use hotkey::{HotkeyListener, HotkeyManager, parse_hotkey};
pub use temp::{CapturedImage, encode_png};

pub use xcap::image;
