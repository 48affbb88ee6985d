//! YOLO dataset config (class manifest) generation.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConvertError;
use crate::io::write_atomic;
use crate::relabel::RelabelMap;
use crate::types::ClassTarget;

// Value written for the dataset location fields; the user fills these in
const PLACEHOLDER: &str = "###";

/// Target classes, one per index, in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassManifest {
    entries: Vec<ClassTarget>,
}

impl ClassManifest {
    /// Collapse the relabel map into one entry per target class index.
    ///
    /// Several source labels may share a class. Sharing an index under two
    /// different names is rejected with [`ConvertError::ConflictingClassName`].
    pub fn from_relabel_map(relabel_map: &RelabelMap) -> Result<Self, ConvertError> {
        let mut by_index: BTreeMap<u32, &str> = BTreeMap::new();

        for (_, target) in relabel_map.iter() {
            match by_index.get(&target.index) {
                Some(existing) if *existing != target.name => {
                    // Report the pair in a stable order regardless of map iteration
                    let (first, second) = if *existing < target.name.as_str() {
                        (existing.to_string(), target.name.clone())
                    } else {
                        (target.name.clone(), existing.to_string())
                    };
                    return Err(ConvertError::ConflictingClassName {
                        index: target.index,
                        first,
                        second,
                    });
                }
                Some(_) => {}
                None => {
                    by_index.insert(target.index, &target.name);
                }
            }
        }

        Ok(Self {
            entries: by_index
                .into_iter()
                .map(|(index, name)| ClassTarget::new(index, name))
                .collect(),
        })
    }

    pub fn entries(&self) -> &[ClassTarget] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the YOLO dataset config, with the dataset locations left as
    /// placeholders.
    pub fn render(&self) -> String {
        let mut yaml_content = format!(
            "path: {p}\ntrain: {p}\nval: {p}\ntest:\n",
            p = PLACEHOLDER
        );
        yaml_content.push_str("\nnames:\n");
        for entry in &self.entries {
            yaml_content.push_str(&format!("  {}: {}\n", entry.index, entry.name));
        }
        yaml_content
    }
}

/// Write the rendered manifest to `path`, replacing any previous version whole.
pub fn write_manifest(path: &Path, manifest: &ClassManifest) -> Result<(), ConvertError> {
    write_atomic(path, &manifest.render()).map_err(|source| ConvertError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })
}
