use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::SplitPaths;
use crate::error::ConvertError;
use crate::io::{read_annotation_file, write_label_file, ImageDimensionSource};
use crate::relabel::RelabelMap;
use crate::types::{AnnotationObject, BoundingBox, ConversionStats, ImageDimensions, Polygon};

/// How the annotation files of a split are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    /// One file at a time, in listing order
    #[default]
    Sequential,
    /// Files spread over the rayon thread pool
    Parallel,
}

/// Result of converting one annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Label file contents, one `\n`-terminated line per kept object
    pub contents: String,
    /// Objects written as label lines
    pub written: usize,
    /// Objects dropped because their label is not in the relabel map
    pub skipped: usize,
}

/// Convert every annotation file in `annotation_files`, writing one label file
/// per input into the split's output directory.
///
/// Stops at the first failure. `pb` is advanced once per finished file.
pub fn process_annotations<R>(
    annotation_files: &[PathBuf],
    split: &SplitPaths,
    relabel_map: &RelabelMap,
    images: &R,
    pb: &ProgressBar,
    execution: Execution,
) -> Result<ConversionStats, ConvertError>
where
    R: ImageDimensionSource + Sync + ?Sized,
{
    match execution {
        Execution::Sequential => {
            let mut stats = ConversionStats::new();
            for annotation_path in annotation_files {
                let converted = process_annotation(annotation_path, split, relabel_map, images)?;
                stats.record_file(converted.written, converted.skipped);
                pb.inc(1);
            }
            Ok(stats)
        }
        Execution::Parallel => annotation_files
            .par_iter()
            .try_fold(ConversionStats::new, |mut stats, annotation_path| {
                let converted = process_annotation(annotation_path, split, relabel_map, images)?;
                stats.record_file(converted.written, converted.skipped);
                pb.inc(1);
                Ok::<_, ConvertError>(stats)
            })
            .try_reduce(ConversionStats::new, |a, b| Ok(a.merge(b))),
    }
}

/// Convert a single annotation file and write its label file.
pub fn process_annotation<R>(
    annotation_path: &Path,
    split: &SplitPaths,
    relabel_map: &RelabelMap,
    images: &R,
) -> Result<ConvertedFile, ConvertError>
where
    R: ImageDimensionSource + ?Sized,
{
    let stem = annotation_path
        .file_stem()
        .ok_or_else(|| ConvertError::AnnotationDiscovery {
            path: annotation_path.to_path_buf(),
            message: "annotation path has no file name".to_string(),
        })?;

    let image_path = split
        .images_dir
        .join(file_name_with_extension(stem, &split.image_extension));
    let dimensions = images.dimensions(&image_path)?;

    let annotation = read_annotation_file(annotation_path)?;
    let converted = convert_objects(&annotation.objects, dimensions, relabel_map);

    let label_path = split
        .output_dir
        .join(file_name_with_extension(stem, "txt"));
    write_label_file(&label_path, &converted.contents)?;

    debug!(
        "{} -> {} ({} written, {} skipped)",
        annotation_path.display(),
        label_path.display(),
        converted.written,
        converted.skipped
    );

    Ok(converted)
}

// Append an extension without touching dots already in the stem
fn file_name_with_extension(stem: &OsStr, extension: &str) -> OsString {
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    name
}

/// Convert one file's objects to YOLO label lines.
///
/// Objects whose label has no entry in `relabel_map` are skipped; the rest keep
/// their original order.
pub fn convert_objects(
    objects: &[AnnotationObject],
    dimensions: ImageDimensions,
    relabel_map: &RelabelMap,
) -> ConvertedFile {
    let mut contents = String::with_capacity(objects.len() * 48);
    let mut written = 0;

    for object in objects {
        let Some(target) = relabel_map.get(&object.label) else {
            continue;
        };

        let bbox = polygon_to_normalized_xywh(&object.polygon, dimensions);
        contents.push_str(&format_label_line(target.index, &bbox));
        contents.push('\n');
        written += 1;
    }

    ConvertedFile {
        contents,
        written,
        skipped: objects.len() - written,
    }
}

/// Format a label line: `<class> <x_center> <y_center> <width> <height>`.
pub fn format_label_line(class_index: u32, bbox: &BoundingBox) -> String {
    format!(
        "{} {:.7} {:.7} {:.7} {:.7}",
        class_index, bbox.x_center, bbox.y_center, bbox.width, bbox.height
    )
}

/// Reduce a polygon to its enclosing axis-aligned box, normalized by the image size.
pub fn polygon_to_normalized_xywh(polygon: &Polygon, dimensions: ImageDimensions) -> BoundingBox {
    let (x_min, y_min, x_max, y_max) = polygon.points().iter().fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(x_min, y_min, x_max, y_max), &(x, y)| {
            (x_min.min(x), y_min.min(y), x_max.max(x), y_max.max(y))
        },
    );

    let image_width = f64::from(dimensions.width());
    let image_height = f64::from(dimensions.height());

    BoundingBox {
        x_center: (x_max + x_min) / 2.0 / image_width,
        y_center: (y_max + y_min) / 2.0 / image_height,
        width: (x_max - x_min) / image_width,
        height: (y_max - y_min) / image_height,
    }
}
