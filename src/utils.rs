use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = format!(
        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
        label
    );
    let style = ProgressStyle::default_bar()
        .template(&template)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Create an output directory (and parents) if it is missing.
///
/// Existing label files are kept and overwritten one by one during conversion.
pub fn create_output_directory(path: &Path) -> Result<PathBuf, ConvertError> {
    if path.is_dir() {
        log::debug!("Output directory {} already exists", path.display());
    } else {
        fs::create_dir_all(path).map_err(|source| ConvertError::OutputDirectory {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(path.to_path_buf())
}
