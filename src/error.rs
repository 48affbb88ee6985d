use std::path::PathBuf;
use thiserror::Error;

/// The main error type for vistas2yolo operations.
///
/// Every variant is fatal: a conversion run stops at the first error and the
/// process exits with a non-zero status.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Label '{label}' maps to class index {index}, which has no entry in relabels")]
    MissingClassName { label: String, index: u32 },

    #[error("Class index {index} is named both '{first}' and '{second}'")]
    ConflictingClassName {
        index: u32,
        first: String,
        second: String,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Image {path} has invalid dimensions {width}x{height}")]
    InvalidImageDimensions {
        path: PathBuf,
        width: usize,
        height: usize,
    },

    #[error("Failed to read annotation file {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed annotation file {path}: {source}")]
    MalformedAnnotation {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to list annotation files in {path}: {message}")]
    AnnotationDiscovery { path: PathBuf, message: String },

    #[error("Failed to write label file {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load label catalog {path}: {message}")]
    LabelCatalog { path: PathBuf, message: String },
}
