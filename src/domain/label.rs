//! Label domain types.
//!
//! Labels are owned by the mailbox store and identified to users by their
//! full hierarchical name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LabelId;

/// A mailbox label (folder or tag) as handed out by a label store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Store-assigned identifier.
    pub id: LabelId,
    /// Full hierarchical name, e.g. `Abc/Def`.
    pub name: String,
}

impl Label {
    /// Creates a label value.
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns true if `other` names the same label.
    pub fn same_name(&self, other: &Label) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
