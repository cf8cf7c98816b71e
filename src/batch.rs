use log::{debug, error, info};
use rayon::prelude::*;
use std::path::Path;

use crate::config::Args;
use crate::conversion::convert_pair;
use crate::error::RunError;
use crate::io::{discover_files, ensure_output_directory, pair_files};
use crate::types::{FilePair, ProcessingStats, TaskOutcome};
use crate::utils::{create_io_thread_pool, create_progress_bar};

/// Convert every detection/image pair found under the configured directories.
///
/// Only a failure to prepare the run (output directory, file discovery, worker
/// pool, or a count mismatch with `strict_pairing`) is returned as an error.
/// Individual files that fail are logged and counted in the returned stats.
pub fn convert_dataset(args: &Args) -> Result<ProcessingStats, RunError> {
    let output_dir = ensure_output_directory(&args.output)?;

    let detection_files = discover_files(&args.detections, &args.detection_ext)?;
    let image_files = discover_files(&args.images, &args.image_ext)?;
    info!(
        "Found {} detection file(s) and {} image file(s)",
        detection_files.len(),
        image_files.len()
    );

    if args.strict_pairing && detection_files.len() != image_files.len() {
        return Err(RunError::PairCountMismatch {
            detections: detection_files.len(),
            images: image_files.len(),
        });
    }

    let pairing = pair_files(detection_files, image_files);
    let thread_pool = create_io_thread_pool(args.workers)?;
    debug!(
        "Dispatching {} pair(s) on {} worker(s)",
        pairing.pairs.len(),
        thread_pool.current_num_threads()
    );

    let outcomes = thread_pool.install(|| process_pairs_in_parallel(&pairing.pairs, &output_dir));

    let mut stats = ProcessingStats::new();
    stats.unpaired_detections = pairing.unpaired_detections;
    stats.unpaired_images = pairing.unpaired_images;
    for outcome in &outcomes {
        stats.record(outcome);
    }
    stats.print_summary();

    Ok(stats)
}

/// Convert `detections_dir` against `images_dir` into `output_dir` with default
/// settings and return how many files were converted.
pub fn run(
    detections_dir: impl AsRef<Path>,
    images_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<usize, RunError> {
    let args = Args::new(
        detections_dir.as_ref(),
        images_dir.as_ref(),
        output_dir.as_ref(),
    );
    convert_dataset(&args).map(|stats| stats.successful_conversions)
}

/// Run one conversion task per pair on the current pool and wait for all of them.
/// Outcomes come back in the same order as `pairs`.
pub fn process_pairs_in_parallel(pairs: &[FilePair], output_dir: &Path) -> Vec<TaskOutcome> {
    let pb = create_progress_bar(pairs.len() as u64);

    let outcomes: Vec<TaskOutcome> = pairs
        .par_iter()
        .map(|pair| {
            let outcome = process_pair(pair, output_dir);
            pb.inc(1);
            outcome
        })
        .collect();

    pb.finish_and_clear();
    outcomes
}

/// Convert a single pair, turning any failure into a failed outcome
pub fn process_pair(pair: &FilePair, output_dir: &Path) -> TaskOutcome {
    let result = convert_pair(pair, output_dir);
    match &result {
        Ok(_) => {
            let file_name = pair
                .detection_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("{} converted...", file_name);
        }
        Err(e) => error!("ERROR: {}", e),
    }

    TaskOutcome {
        detection_path: pair.detection_path.clone(),
        result,
    }
}
