use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::labels;
use crate::types::{DetectionRecord, FilePair, ImageDimensions, KittiRecord};
use crate::utils::read_image_dimensions;

/// Parse one `<class> <cx> <cy> <w> <h>` line. Fields past the fifth are
/// ignored; a blank line is malformed.
pub fn parse_detection_line(
    line: &str,
    path: &Path,
    line_num: usize,
) -> Result<DetectionRecord, ConvertError> {
    let malformed = |reason: String| ConvertError::MalformedLine {
        path: path.to_path_buf(),
        line: line_num,
        reason,
    };

    let mut fields = line.split_whitespace();
    let class_field = fields
        .next()
        .ok_or_else(|| malformed("blank line".to_string()))?;

    let class_index = class_field
        .parse::<i64>()
        .map_err(|_| malformed(format!("invalid class index '{}'", class_field)))?;

    let mut coords = [0.0f64; 4];
    for (i, slot) in coords.iter_mut().enumerate() {
        let field = fields
            .next()
            .ok_or_else(|| malformed(format!("expected 5 fields, found {}", i + 1)))?;
        *slot = field
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| malformed(format!("invalid coordinate '{}'", field)))?;
    }

    let [cx, cy, w, h] = coords;
    Ok(DetectionRecord {
        class_index,
        cx,
        cy,
        w,
        h,
    })
}

// Truncate toward zero, refusing values with no i64 counterpart
fn truncate_coordinate(value: f64) -> Result<i64, ConvertError> {
    // i64::MAX as f64 rounds up to 2^63, which itself does not fit
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(ConvertError::CoordinateOutOfRange { value })
    }
}

/// Convert a normalized center box into truncated absolute corners.
pub fn convert_record(
    record: &DetectionRecord,
    dims: ImageDimensions,
) -> Result<KittiRecord, ConvertError> {
    let label = labels::resolve(record.class_index)?;
    let width = f64::from(dims.width);
    let height = f64::from(dims.height);

    // Operation order is kept fixed so outputs match existing KITTI files bit for bit
    let x1 = width * (2.0 * record.cx - record.w) / 2.0;
    let y1 = height * (2.0 * record.cy - record.h) / 2.0;
    let x2 = width * (2.0 * record.cx + record.w) / 2.0;
    let y2 = height * (2.0 * record.cy + record.h) / 2.0;

    Ok(KittiRecord {
        label,
        x1: truncate_coordinate(x1)?,
        y1: truncate_coordinate(y1)?,
        x2: truncate_coordinate(x2)?,
        y2: truncate_coordinate(y2)?,
    })
}

/// Convert every record in order. The first failing record fails them all.
pub fn convert_records(
    records: &[DetectionRecord],
    dims: ImageDimensions,
) -> Result<Vec<KittiRecord>, ConvertError> {
    records
        .iter()
        .map(|record| convert_record(record, dims))
        .collect()
}

/// Read and parse all detections of a file
pub fn read_detection_file(path: &Path) -> Result<Vec<DetectionRecord>, ConvertError> {
    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        records.push(parse_detection_line(&line, path, idx + 1)?);
    }
    Ok(records)
}

/// Render records in KITTI layout, one newline-terminated line each
pub fn format_kitti(records: &[KittiRecord]) -> String {
    let mut kitti_data = String::with_capacity(records.len() * 32);
    for record in records {
        kitti_data.push_str(&record.to_string());
        kitti_data.push('\n');
    }
    kitti_data
}

/// Convert one detection/image pair and write the result into `output_dir`
/// under the detection file's name, replacing any existing file.
pub fn convert_pair(pair: &FilePair, output_dir: &Path) -> Result<PathBuf, ConvertError> {
    let dims = read_image_dimensions(&pair.image_path)?;
    let records = read_detection_file(&pair.detection_path)?;
    let converted = convert_records(&records, dims)?;

    let file_name = pair
        .detection_path
        .file_name()
        .ok_or_else(|| ConvertError::Io {
            path: pair.detection_path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        })?;
    let output_path = output_dir.join(file_name);

    let io_err = |source| ConvertError::Io {
        path: output_path.clone(),
        source,
    };
    let mut writer = BufWriter::new(File::create(&output_path).map_err(io_err)?);
    writer
        .write_all(format_kitti(&converted).as_bytes())
        .map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(output_path)
}
