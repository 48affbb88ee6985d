//! Mapillary Vistas to YOLO format converter
//!
//! This library converts per-image polygon annotations into YOLO bounding-box
//! label files, remapping the source label taxonomy onto a smaller set of
//! target classes, and generates the matching YOLO dataset config.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod manifest;
pub mod relabel;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Cli, Command, Config, LabelScheme, SplitPaths};
pub use conversion::{convert_objects, polygon_to_normalized_xywh, Execution};
pub use dataset::{convert_split, process_dataset};
pub use error::ConvertError;
pub use io::{ImageDimensionSource, ImageSizeReader};
pub use manifest::{write_manifest, ClassManifest};
pub use relabel::RelabelMap;
pub use types::{
    AnnotationFile, AnnotationObject, BoundingBox, ClassTarget, ConversionStats, ImageDimensions,
    LabelTarget, Polygon,
};
