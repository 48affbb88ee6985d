use indicatif::ProgressBar;
use log::{debug, info};
use std::path::Path;

use crate::config::{Config, SplitPaths, SPLITS};
use crate::conversion::{process_annotations, Execution};
use crate::error::ConvertError;
use crate::io::{list_annotation_files, ImageDimensionSource};
use crate::manifest::{write_manifest, ClassManifest};
use crate::relabel::RelabelMap;
use crate::types::ConversionStats;
use crate::utils::{create_output_directory, create_progress_bar};

/// Convert every annotation file of one split into YOLO label files.
///
/// The output directory is created if needed. `pb` gets its length set to the
/// number of annotation files and is finished once the split is done. The
/// first failing file aborts the whole split.
pub fn convert_split<R>(
    split: &SplitPaths,
    relabel_map: &RelabelMap,
    images: &R,
    pb: &ProgressBar,
    execution: Execution,
) -> Result<ConversionStats, ConvertError>
where
    R: ImageDimensionSource + Sync + ?Sized,
{
    let annotation_files = list_annotation_files(&split.annotations_dir)?;
    info!(
        "Found {} annotation files in {}",
        annotation_files.len(),
        split.annotations_dir.display()
    );

    create_output_directory(&split.output_dir)?;

    pb.set_length(annotation_files.len() as u64);
    let stats = process_annotations(
        &annotation_files,
        split,
        relabel_map,
        images,
        pb,
        execution,
    )?;
    pb.finish_with_message(format!("{} conversion complete", split.name));

    Ok(stats)
}

/// Main dataset processing pipeline: convert every split, then write the
/// class manifest to `manifest_path`.
///
/// The label scheme is checked before any file is touched.
pub fn process_dataset<R>(
    config: &Config,
    manifest_path: &Path,
    images: &R,
    execution: Execution,
) -> Result<ClassManifest, ConvertError>
where
    R: ImageDimensionSource + Sync + ?Sized,
{
    let relabel_map = RelabelMap::from_scheme(&config.label_scheme())?;
    let manifest = ClassManifest::from_relabel_map(&relabel_map)?;
    info!(
        "Remapping {} source labels onto {} target classes",
        relabel_map.len(),
        manifest.len()
    );
    for class in manifest.entries() {
        debug!("Target class {}", class);
    }

    for split in SPLITS {
        let paths = config.split_paths(split);
        info!("Converting split '{}'...", split);

        let pb = create_progress_bar(0, &format!("Conversion progress ({})", split));
        let stats = convert_split(&paths, &relabel_map, images, &pb, execution)?;
        stats.print_summary(split);
    }

    info!("Creating {}...", manifest_path.display());
    write_manifest(manifest_path, &manifest)?;
    info!("Conversion process completed successfully.");

    Ok(manifest)
}
