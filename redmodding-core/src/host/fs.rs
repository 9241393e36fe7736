//! Real filesystem backed by `tokio::fs`.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::Filesystem;
use crate::error::FsError;

/// Probe file written to check directory writability.
const WRITE_PROBE: &str = ".redmodding-write-test";

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFilesystem;

#[async_trait]
impl Filesystem for TokioFilesystem {
    async fn stat_path(&self, path: &Path) -> Result<(), FsError> {
        tokio::fs::metadata(path)
            .await
            .map(|_| ())
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn ensure_writable_directory(&self, path: &Path) -> Result<(), FsError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| creation_error(path, e))?;

        let probe = path.join(WRITE_PROBE);
        if let Err(e) = tokio::fs::write(&probe, b"").await {
            debug!(path = %path.display(), error = %e, "Write probe failed");
            return Err(FsError::NotWritable {
                path: path.to_path_buf(),
            });
        }
        tokio::fs::remove_file(&probe)
            .await
            .map_err(|e| FsError::from_io(&probe, e))
    }
}

/// A directory we may not create is reported as not writable.
fn creation_error(path: &Path, source: std::io::Error) -> FsError {
    match FsError::from_io(path, source) {
        FsError::PermissionDenied { path } => FsError::NotWritable { path },
        other => other,
    }
}
