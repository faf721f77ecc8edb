//! Configuration and settings management.
//!
//! This module provides the labeler's settings types and loading. Settings
//! are stored in the user's config directory as JSON.

mod settings;

pub use settings::{
    ConfigError, LabelingSettings, Settings, StorageSettings, TrustedDomains,
    DEFAULT_TRUSTED_DOMAIN,
};
