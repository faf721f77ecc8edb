//! Label resolution against a label store.
//!
//! Maps decoded label paths to store labels. Missing labels are created only
//! when the caller allows it; otherwise they are dropped without error.

use crate::domain::{Label, LabelPath};
use crate::providers::{LabelStore, Result};

/// Resolves label paths to labels in a [`LabelStore`].
pub struct LabelResolver<'a, S: LabelStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LabelStore + ?Sized> LabelResolver<'a, S> {
    /// Creates a resolver over the given store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Looks up a label by exact name, creating it if absent and allowed.
    ///
    /// Returns `Ok(None)` when the label does not exist and may not be
    /// created. An existing label is never created again.
    pub fn resolve_label(&self, name: &LabelPath, create_if_absent: bool) -> Result<Option<Label>> {
        if let Some(label) = self.store.find_label_by_name(name.as_str())? {
            return Ok(Some(label));
        }

        if !create_if_absent {
            tracing::debug!(label = %name, "Label does not exist, not creating");
            return Ok(None);
        }

        let label = self.store.create_label(name.as_str())?;
        tracing::info!(label = %label.name, id = %label.id, "Created label");
        Ok(Some(label))
    }

    /// Resolves every path in order, dropping the ones that stay absent.
    ///
    /// Order follows `paths`. Two paths with the same name yield two entries.
    pub fn resolve_all(&self, paths: &[LabelPath], create_if_absent: bool) -> Result<Vec<Label>> {
        let mut labels = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(label) = self.resolve_label(path, create_if_absent)? {
                labels.push(label);
            }
        }
        Ok(labels)
    }
}
