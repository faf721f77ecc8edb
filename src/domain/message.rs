//! Message header records.

use serde::{Deserialize, Serialize};

/// The headers of one message that labeling looks at.
///
/// `from` and `to` are the raw header values, either a bare address or a
/// `"Display Name" <address>` signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Raw From header.
    pub from: String,
    /// Raw To header.
    pub to: String,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
}

impl Message {
    /// Creates a message with the given headers.
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
        }
    }
}
