//! Directories REDmodding needs under the game root.
//!
//! Each directory is prepared independently and every outcome is reported.
//! A failure is logged and never stops the remaining directories.

use futures::future::join_all;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::error::FsError;
use crate::host::{HostContext, LogLevel};
use crate::tools::join_relative;

/// User REDmods are installed here.
pub const REDMODDING_REQUIRED_DIR_FOR_MODS: &str = "mods";

/// REDmod deploy writes its output here.
pub const REDMODDING_REQUIRED_DIR_FOR_GENERATED_FILES: &str = "r6/cache/modded";

/// Load order storage.
pub const V2077_LOAD_ORDER_DIR: &str = "V2077/Load Order";

/// How loudly a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Likely created later anyway, e.g. by the first mod install. Warn.
    Optional,
    /// Features depend on it. Error, but keep going.
    Important,
}

impl Criticality {
    fn failure_level(self) -> LogLevel {
        match self {
            Self::Optional => LogLevel::Warn,
            Self::Important => LogLevel::Error,
        }
    }
}

/// A directory the workflow ensures exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredDir {
    /// `/`-separated, relative to the game root.
    pub relative: &'static str,
    pub purpose: &'static str,
    pub criticality: Criticality,
}

/// Directories for user mods and generated files.
pub const MODDING_DIRS: [RequiredDir; 2] = [
    RequiredDir {
        relative: REDMODDING_REQUIRED_DIR_FOR_MODS,
        purpose: "REDmod mods",
        criticality: Criticality::Optional,
    },
    RequiredDir {
        relative: REDMODDING_REQUIRED_DIR_FOR_GENERATED_FILES,
        purpose: "REDmod generated files",
        criticality: Criticality::Optional,
    },
];

/// Load order storage directory.
pub const LOAD_ORDER_DIRS: [RequiredDir; 1] = [RequiredDir {
    relative: V2077_LOAD_ORDER_DIR,
    purpose: "load order storage",
    criticality: Criticality::Important,
}];

/// Result of preparing one directory.
#[derive(Debug)]
pub struct DirectoryOutcome {
    pub dir: RequiredDir,
    pub path: PathBuf,
    pub result: Result<(), FsError>,
}

impl DirectoryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ensures every directory in `dirs` exists and is writable under `game_root`.
///
/// Attempts run concurrently since the paths are disjoint. Outcomes come back
/// in input order. This never fails; the caller decides what a failure means.
pub async fn prepare_directories(
    ctx: &HostContext,
    game_root: &Path,
    dirs: &[RequiredDir],
) -> Vec<DirectoryOutcome> {
    let attempts = dirs.iter().map(|dir| async move {
        let path = join_relative(game_root, dir.relative);
        let result = ctx.fs.ensure_writable_directory(&path).await;
        match &result {
            Ok(()) => ctx.log_with(
                LogLevel::Info,
                &format!("Directory for {} exists and is writable, good!", dir.purpose),
                json!({ "path": path.display().to_string() }),
            ),
            Err(e) => ctx.log_with(
                dir.criticality.failure_level(),
                &format!(
                    "Unable to create or access directory for {} under {}",
                    dir.purpose,
                    game_root.display()
                ),
                json!({ "path": path.display().to_string(), "error": e.to_string() }),
            ),
        }
        DirectoryOutcome {
            dir: *dir,
            path,
            result,
        }
    });

    join_all(attempts).await
}
