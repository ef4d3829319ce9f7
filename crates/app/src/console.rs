//! User-facing console output

use crate::capture::SnapError;
use capture_gdi::Rect;
use std::path::Path;

/// Human-readable progress lines for the person at the keyboard
pub trait Console: Send + Sync {
    fn banner(&self);
    fn ready(&self);
    fn region_updated(&self, rect: Rect);
    fn saved(&self, path: &Path);
    fn failed(&self, error: &SnapError);
    fn exiting(&self);
}

/// Prints to stdout, failures to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn banner(&self) {
        println!("=== RegionSnap ===");
        println!("Instructions:");
        println!("1. Hold Ctrl and drag the mouse to select/update the capture region");
        println!("2. Press SPACE to capture the region");
        println!("3. Press ESC to exit");
        println!();
    }

    fn ready(&self) {
        println!("Overlay ready. Hold Ctrl and drag to select a region.");
        println!();
    }

    fn region_updated(&self, rect: Rect) {
        println!("Capture region updated: {}", rect);
    }

    fn saved(&self, path: &Path) {
        println!("Screenshot saved: {}", path.display());
    }

    fn failed(&self, error: &SnapError) {
        eprintln!("Error: {}", error);
    }

    fn exiting(&self) {
        println!();
        println!("Exiting...");
    }
}
