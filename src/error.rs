use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single detection file. Never aborts the batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unknown class index {class_index}")]
    UnknownClass { class_index: i64 },

    #[error("malformed detection in {} line {line}: {reason}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("box corner {value} is not a representable pixel coordinate")]
    CoordinateOutOfRange { value: f64 },

    #[error("failed to read image dimensions of {}: {source}", path.display())]
    ImageDimensions {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure that stops the whole run before any file is converted.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid file pattern {pattern}: {source}")]
    Discovery {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("found {detections} detection files but {images} image files")]
    PairCountMismatch { detections: usize, images: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
