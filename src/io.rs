use glob::{glob, Pattern};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::ConvertError;
use crate::types::{AnnotationFile, ImageDimensions};

/// Source of image sizes for the images paired with annotation files.
pub trait ImageDimensionSource {
    /// Height and width of the image at `path`.
    ///
    /// Missing or unreadable images, and images with a zero side, are errors.
    fn dimensions(&self, path: &Path) -> Result<ImageDimensions, ConvertError>;
}

/// Reads image sizes from file headers without decoding pixel data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSizeReader;

impl ImageDimensionSource for ImageSizeReader {
    fn dimensions(&self, path: &Path) -> Result<ImageDimensions, ConvertError> {
        let size = imagesize::size(path).map_err(|source| ConvertError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

        let invalid = || ConvertError::InvalidImageDimensions {
            path: path.to_path_buf(),
            width: size.width,
            height: size.height,
        };
        let height = u32::try_from(size.height).map_err(|_| invalid())?;
        let width = u32::try_from(size.width).map_err(|_| invalid())?;

        ImageDimensions::new(height, width).ok_or_else(invalid)
    }
}

/// List the `*.json` annotation files directly inside `dir`, sorted by name.
pub fn list_annotation_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !dir.is_dir() {
        return Err(ConvertError::AnnotationDiscovery {
            path: dir.to_path_buf(),
            message: "directory does not exist".to_string(),
        });
    }

    let pattern = format!("{}/*.json", Pattern::escape(&dir.to_string_lossy()));
    let entries = glob(&pattern).map_err(|e| ConvertError::AnnotationDiscovery {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConvertError::AnnotationDiscovery {
            path: e.path().to_path_buf(),
            message: e.error().to_string(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Read and parse a single annotation file, streaming from disk.
pub fn read_annotation_file(path: &Path) -> Result<AnnotationFile, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::AnnotationRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        ConvertError::MalformedAnnotation {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Replace `path` with `contents`.
///
/// The data goes to a temporary file in the same directory first and is then
/// renamed over the target, so readers never observe a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Write one YOLO label file.
pub fn write_label_file(path: &Path, contents: &str) -> Result<(), ConvertError> {
    write_atomic(path, contents).map_err(|source| ConvertError::LabelWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// One entry of the dataset's label catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogLabel {
    pub name: String,
}

#[derive(Deserialize)]
struct LabelCatalog {
    labels: Vec<CatalogLabel>,
}

/// Read the source labels listed in the dataset's `config_<version>.json`.
pub fn read_label_catalog(path: &Path) -> Result<Vec<CatalogLabel>, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::LabelCatalog {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let catalog: LabelCatalog =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ConvertError::LabelCatalog {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(catalog.labels)
}
