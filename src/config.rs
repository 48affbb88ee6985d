use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::types::LabelTarget;

// Splits converted by a default run, in order
pub const SPLITS: &[&str] = &["training", "validation"];

/// Command-line arguments for converting Mapillary Vistas polygons to YOLO labels.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML config holding the dataset root and label tables
    #[arg(long = "config", default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    /// Where to write the YOLO dataset config listing the target classes
    #[arg(long = "manifest", default_value = "vistas.yaml", global = true)]
    pub manifest: PathBuf,

    /// Convert the annotation files of a split on all cores
    #[arg(long = "parallel", global = true)]
    pub parallel: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Convert the training and validation splits, then write the manifest (default)
    Convert,
    /// Print the dataset's source labels with their catalog positions
    ListLabels,
}

/// Source-label remapping tables, as read from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelScheme {
    /// Source label -> target class index, or `x` to drop the label
    pub labels: BTreeMap<String, LabelTarget>,
    /// Target class index -> target class name
    pub relabels: BTreeMap<u32, String>,
}

/// The conversion config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub vistas_path: PathBuf,
    #[serde(default = "default_dataset_version")]
    pub dataset_version: String,
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
    pub labels: BTreeMap<String, LabelTarget>,
    pub relabels: BTreeMap<u32, String>,
}

fn default_dataset_version() -> String {
    "v2.0".to_string()
}

fn default_image_extension() -> String {
    "jpg".to_string()
}

/// Input and output locations for one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub name: String,
    pub annotations_dir: PathBuf,
    pub images_dir: PathBuf,
    pub output_dir: PathBuf,
    pub image_extension: String,
}

impl Config {
    /// Read and parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|source| ConvertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConvertError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn label_scheme(&self) -> LabelScheme {
        LabelScheme {
            labels: self.labels.clone(),
            relabels: self.relabels.clone(),
        }
    }

    /// Dataset layout for `split`:
    /// `<root>/<split>/<version>/polygons` in, `<root>/<split>/images` for
    /// dimensions, `<root>/<split>/<version>/yolo` out.
    pub fn split_paths(&self, split: &str) -> SplitPaths {
        let split_root = self.vistas_path.join(split);
        let version_root = split_root.join(&self.dataset_version);
        SplitPaths {
            name: split.to_string(),
            annotations_dir: version_root.join("polygons"),
            images_dir: split_root.join("images"),
            output_dir: version_root.join("yolo"),
            image_extension: self.image_extension.clone(),
        }
    }

    /// Path of the dataset's label catalog, e.g. `config_v2.0.json`.
    pub fn label_catalog_path(&self) -> PathBuf {
        self.vistas_path
            .join(format!("config_{}.json", self.dataset_version))
    }
}
