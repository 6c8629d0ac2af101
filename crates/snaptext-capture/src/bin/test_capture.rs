//! Simple capture test - run with: cargo run -p snaptext-capture --bin test_capture

use anyhow::Result;
use snaptext_types::CaptureRegion;

fn main() -> Result<()> {
    // 1. List monitors
    let monitors = snaptext_capture::list_monitors()?;
    for (i, (name, x, y, width, height)) in monitors.iter().enumerate() {
        println!("[{}] {} - {}x{} at ({}, {})", i, name, width, height, x, y);
    }

    // 2. Capture a region of the primary monitor
    let region = CaptureRegion {
        x: 0,
        y: 0,
        width: 400,
        height: 200,
    };
    let start = std::time::Instant::now();
    let image = snaptext_capture::capture_screen_region(region)?;
    println!(
        "Captured {}x{} in {:?}",
        image.width(),
        image.height(),
        start.elapsed()
    );

    // 3. Write and clean up the temp file the same way the app does
    let captured = snaptext_capture::CapturedImage::write(&std::env::temp_dir(), &image)?;
    println!("Saved to {}", captured.path().display());
    let bytes = captured.read_bytes()?;
    println!("{} bytes", bytes.len());
    captured.remove()?;

    // 4. A degenerate selection must come back as an error
    let empty = CaptureRegion {
        x: 10,
        y: 10,
        width: 0,
        height: 0,
    };
    match snaptext_capture::capture_screen_region(empty) {
        Ok(_) => println!("Unexpected capture for empty region"),
        Err(e) => println!("Empty region: {}", e),
    }

    Ok(())
}
