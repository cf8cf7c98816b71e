use glob::glob;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RunError;
use crate::types::{FilePair, Pairing};

/// Make sure the output directory exists, creating parents as needed.
/// Existing contents are left in place.
pub fn ensure_output_directory(path: &Path) -> Result<PathBuf, RunError> {
    if !path.exists() {
        info!("Creating path: {}", path.display());
        fs::create_dir_all(path).map_err(|source| RunError::OutputDir {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Path {} OK", path.display());
    } else if !path.is_dir() {
        return Err(RunError::OutputDir {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            ),
        });
    }
    Ok(path.to_path_buf())
}

/// List the files directly inside `dir` with the given extension, sorted by full path
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, RunError> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );
    let entries = glob(&pattern).map_err(|source| RunError::Discovery {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Pair detection and image files by their position in sorted order.
///
/// No name matching is done: the i-th detection file goes with the i-th image.
/// Whatever the longer list has beyond the shorter one is left unpaired.
pub fn pair_files(detection_files: Vec<PathBuf>, image_files: Vec<PathBuf>) -> Pairing {
    let unpaired_detections = detection_files.len().saturating_sub(image_files.len());
    let unpaired_images = image_files.len().saturating_sub(detection_files.len());

    let pairs = detection_files
        .into_iter()
        .zip(image_files)
        .map(|(detection_path, image_path)| FilePair {
            detection_path,
            image_path,
        })
        .collect();

    Pairing {
        pairs,
        unpaired_detections,
        unpaired_images,
    }
}
