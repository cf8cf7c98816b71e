//! YOLO to KITTI detection converter
//!
//! This library converts YOLO detection files (class index plus normalized
//! center and size) into KITTI-style lines of `label x1 y1 x2 y2` in absolute
//! pixels, using the paired image to resolve its dimensions.

pub mod batch;
pub mod config;
pub mod conversion;
pub mod error;
pub mod io;
pub mod labels;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use batch::{convert_dataset, run};
pub use config::Args;
pub use conversion::{convert_pair, convert_record, convert_records};
pub use error::{ConvertError, RunError};
pub use labels::resolve;
pub use types::{DetectionRecord, FilePair, ImageDimensions, KittiRecord, ProcessingStats};
