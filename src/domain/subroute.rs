//! Routing tags carried in the local part of an address.

use std::fmt;

use super::address::parse_address;

/// Separates the base local part from its routing tag.
pub const TAG_DELIMITER: char = '+';

/// Subroute used when the local part carries no tag.
pub const DIRECT: &str = "direct";

/// The tag portion of a recipient's local part.
///
/// For `jonathan+abc.def+foo_bar@example.com` this is `abc.def+foo_bar`;
/// for an untagged address it is [`DIRECT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subroute(String);

impl Subroute {
    /// Wraps a raw subroute string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The subroute for untagged addresses.
    pub fn direct() -> Self {
        Self(DIRECT.to_string())
    }

    /// Returns the subroute text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the untagged sentinel.
    pub fn is_direct(&self) -> bool {
        self.0 == DIRECT
    }
}

impl fmt::Display for Subroute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the subroute from a bare address.
///
/// Only the first `+` in the local part splits; later ones stay in the
/// subroute, where they separate label groups.
pub fn get_subroute(address: &str) -> Subroute {
    let parts = parse_address(address);
    match parts.local_part.split_once(TAG_DELIMITER) {
        Some((_, tag)) => Subroute::new(tag),
        None => Subroute::direct(),
    }
}
