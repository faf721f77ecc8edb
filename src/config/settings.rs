//! Labeler settings and configuration types.
//!
//! Settings are read once from `~/.config/sublabel/settings.json` (or the
//! XDG/platform equivalent) at startup and never change afterwards. A
//! missing file means defaults; partial files fill in the rest.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sender domain allowed to create labels out of the box.
pub const DEFAULT_TRUSTED_DOMAIN: &str = "bswck.dev";

const SETTINGS_FILE: &str = "settings.json";
const DATABASE_FILE: &str = "mailbox.db";

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no home directory to place {0} in")]
    NoHomeDirectory(&'static str),
}

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How labels are derived and applied.
    pub labeling: LabelingSettings,
    /// Where the mailbox lives.
    pub storage: StorageSettings,
}

impl Settings {
    /// Loads settings from a JSON file, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the platform-specific settings file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .ok_or(ConfigError::NoHomeDirectory(SETTINGS_FILE))
    }
}

/// Label derivation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingSettings {
    /// Sender domains whose mail may create missing labels.
    pub trusted_domains: TrustedDomains,
    /// Resolve labels and report them without adding them to threads.
    pub dry_run: bool,
}

impl Default for LabelingSettings {
    fn default() -> Self {
        Self {
            trusted_domains: TrustedDomains::new([DEFAULT_TRUSTED_DOMAIN]),
            dry_run: false,
        }
    }
}

/// Mailbox storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite database path; defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// JSON mailbox snapshot to label instead of the database.
    ///
    /// The file is read before the run and rewritten with the new labels
    /// afterwards, unless the run is a dry run.
    pub snapshot_path: Option<PathBuf>,
}

impl StorageSettings {
    /// Returns the configured database path or the platform default.
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .ok_or(ConfigError::NoHomeDirectory(DATABASE_FILE))
    }
}

/// The allow-list of sender domains trusted to create labels.
///
/// Matching is exact: `Example.com` and `example.com` are different domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedDomains(BTreeSet<String>);

impl TrustedDomains {
    /// Builds an allow-list from domain names.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(domains.into_iter().map(Into::into).collect())
    }

    /// Returns true if `domain` is on the list.
    pub fn contains(&self, domain: &str) -> bool {
        self.0.contains(domain)
    }

    /// Returns the number of trusted domains.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no domain is trusted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the trusted domains in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "bswck", "sublabel")
}
