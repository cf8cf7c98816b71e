use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for converting YOLO detections to KITTI boxes.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing the .txt YOLO detections
    #[arg(short = 'd', long = "detections")]
    pub detections: PathBuf,

    /// Directory containing the corresponding images
    #[arg(short = 'i', long = "images")]
    pub images: PathBuf,

    /// Directory to save the converted files
    #[arg(short = 'o', long = "output", default_value = "files_converted")]
    pub output: PathBuf,

    /// Number of worker threads (0 = one per available CPU)
    #[arg(long = "workers", default_value_t = 0)]
    pub workers: usize,

    /// Abort before converting anything when the detection and image counts differ
    #[arg(long = "strict_pairing")]
    pub strict_pairing: bool,

    /// Extension of the image files to pair with
    #[arg(long = "image_ext", default_value = "jpg", value_parser = validate_extension)]
    pub image_ext: String,

    /// Extension of the detection files to convert
    #[arg(long = "detection_ext", default_value = "txt", value_parser = validate_extension)]
    pub detection_ext: String,
}

impl Args {
    /// Arguments with every optional setting at its default.
    pub fn new(
        detections: impl Into<PathBuf>,
        images: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detections: detections.into(),
            images: images.into(),
            output: output.into(),
            workers: 0,
            strict_pairing: false,
            image_ext: "jpg".to_string(),
            detection_ext: "txt".to_string(),
        }
    }
}

// Extensions end up inside a glob pattern, so keep them to a plain suffix
pub fn validate_extension(s: &str) -> Result<String, String> {
    let ext = s.trim_start_matches('.');
    if ext.is_empty() {
        return Err("EXT must not be empty".to_string());
    }
    if ext
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '*' | '?' | '[' | ']' | '{' | '}'))
    {
        return Err("EXT must be a plain file extension such as 'jpg'".to_string());
    }
    Ok(ext.to_string())
}
