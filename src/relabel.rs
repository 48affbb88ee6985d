//! Source-to-target label remapping.

use std::collections::HashMap;

use crate::config::LabelScheme;
use crate::error::ConvertError;
use crate::types::{ClassTarget, LabelTarget};

/// Immutable map from source label to target class.
///
/// Labels marked as excluded in the [`LabelScheme`] have no entry, so a failed
/// lookup means "drop this object".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelabelMap {
    entries: HashMap<String, ClassTarget>,
}

impl RelabelMap {
    /// Build the map from a label scheme, dropping excluded labels.
    ///
    /// Fails with [`ConvertError::MissingClassName`] if a mapped index has no
    /// name in `relabels`.
    pub fn from_scheme(scheme: &LabelScheme) -> Result<Self, ConvertError> {
        let mut entries = HashMap::with_capacity(scheme.labels.len());

        for (label, target) in &scheme.labels {
            let index = match target {
                LabelTarget::Mapped(index) => *index,
                LabelTarget::Excluded => continue,
            };
            let name = scheme
                .relabels
                .get(&index)
                .ok_or_else(|| ConvertError::MissingClassName {
                    label: label.clone(),
                    index,
                })?;
            entries.insert(label.clone(), ClassTarget::new(index, name.clone()));
        }

        Ok(Self { entries })
    }

    /// Build the map directly from `(source label, target)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ClassTarget)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, target)| (label.into(), target))
                .collect(),
        }
    }

    pub fn get(&self, label: &str) -> Option<&ClassTarget> {
        self.entries.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassTarget)> {
        self.entries
            .iter()
            .map(|(label, target)| (label.as_str(), target))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
