use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::error::ConvertError;
use crate::types::ImageDimensions;

/// Read the pixel size of an image from its header, without decoding pixels.
/// The file handle is released before this returns.
pub fn read_image_dimensions(path: &Path) -> Result<ImageDimensions, ConvertError> {
    let size = imagesize::size(path).map_err(|source| ConvertError::ImageDimensions {
        path: path.to_path_buf(),
        source,
    })?;

    let too_large = |what: &str, value: usize| ConvertError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("image {} {} does not fit in u32", what, value),
        ),
    };
    let width = u32::try_from(size.width).map_err(|_| too_large("width", size.width))?;
    let height = u32::try_from(size.height).map_err(|_| too_large("height", size.height))?;

    Ok(ImageDimensions { width, height })
}

/// Progress over the dispatched pairs. Draws nothing when stderr is not a terminal.
pub fn create_progress_bar(pairs: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "[{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} pairs ({per_sec}, {eta} left)",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    ProgressBar::new(pairs).with_style(style)
}

/// Build the worker pool; `workers == 0` uses one thread per available CPU.
pub fn create_io_thread_pool(workers: usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    let num_threads = if workers == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        workers
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|idx| format!("yolo2kitti-worker-{}", idx))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_io_thread_pool() {
        let pool = create_io_thread_pool(3).unwrap();
        assert_eq!(pool.current_num_threads(), 3);

        let pool = create_io_thread_pool(0).unwrap();
        assert!(pool.current_num_threads() >= 1);
    }

    #[test]
    fn test_create_progress_bar_tracks_pairs() {
        let pb = create_progress_bar(4);
        assert_eq!(pb.length(), Some(4));
        pb.inc(3);
        assert_eq!(pb.position(), 3);
        pb.finish_and_clear();
    }

    #[test]
    fn test_read_image_dimensions_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_image_dimensions(&dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, ConvertError::ImageDimensions { .. }));
    }

    #[test]
    fn test_read_image_dimensions_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(read_image_dimensions(&path).is_err());
    }
}
