//! Error types for the REDmodding core.
//!
//! Each boundary gets its own error so callers can tell a filesystem hiccup
//! from a store lookup failure. Only [`ReadinessError`] ever leaves the setup
//! hook; everything else is logged and absorbed along the way.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem failure while probing or preparing a path.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Directory is not writable: {}", path.display())]
    NotWritable { path: PathBuf },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an IO error, mapping `NotFound` and `PermissionDenied` to their
    /// own variants.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the failure refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::NotWritable { path }
            | Self::Io { path, .. } => path,
        }
    }
}

/// The host's store-detection helper could not place the game.
#[derive(Debug, Error)]
pub enum StoreDetectionError {
    #[error("Game not found in any store for app ids: {0:?}")]
    NotFound(Vec<String>),

    #[error("Store detection failed: {0}")]
    Failed(String),
}

/// Opening a URL or store deep link failed.
#[derive(Debug, Error)]
#[error("Failed to open {url}: {reason}")]
pub struct OpenError {
    pub url: String,
    pub reason: String,
}

impl OpenError {
    pub fn new(url: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors returned by the setup hook.
#[derive(Debug, Error)]
pub enum ReadinessError {
    /// REDmod is missing and the store that owns the game could not be
    /// determined, so no acquisition page can be recommended.
    #[error("Unable to determine the game store while offering REDmod: {0}")]
    StoreDetection(#[from] StoreDetectionError),
}

/// Persisted settings could not be read or written.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}
