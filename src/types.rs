use std::fmt;
use std::path::PathBuf;

use crate::error::ConvertError;

// A YOLO detection: class id plus normalized center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRecord {
    pub class_index: i64,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

// Pixel size of the image a detection file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// A converted detection: label plus absolute pixel corners.
///
/// Corners are truncated toward zero and never clamped to the image, so they
/// may fall outside `[0, width]` / `[0, height]` for out-of-range input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KittiRecord {
    pub label: &'static str,
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl fmt::Display for KittiRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.label, self.x1, self.y1, self.x2, self.y2
        )
    }
}

// A detection file and the image it was paired with by sorted position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub detection_path: PathBuf,
    pub image_path: PathBuf,
}

/// Result of positional pairing, including what was left over.
#[derive(Debug, Default, Clone)]
pub struct Pairing {
    pub pairs: Vec<FilePair>,
    pub unpaired_detections: usize,
    pub unpaired_images: usize,
}

/// What one conversion task produced.
#[derive(Debug)]
pub struct TaskOutcome {
    pub detection_path: PathBuf,
    /// Path of the written file on success
    pub result: Result<PathBuf, ConvertError>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub dispatched: usize,
    pub successful_conversions: usize,
    pub failed_conversions: usize,
    pub unpaired_detections: usize,
    pub unpaired_images: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &TaskOutcome) {
        self.dispatched += 1;
        if outcome.is_success() {
            self.successful_conversions += 1;
        } else {
            self.failed_conversions += 1;
        }
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Pairs dispatched: {}", self.dispatched);
        log::info!("Successful conversions: {}", self.successful_conversions);
        log::info!("Failed conversions: {}", self.failed_conversions);

        if self.unpaired_detections > 0 || self.unpaired_images > 0 {
            log::warn!(
                "Files left without a partner: {} detection file(s), {} image file(s)",
                self.unpaired_detections,
                self.unpaired_images
            );
        }
    }
}
