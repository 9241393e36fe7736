//! Core types for game tools.
//!
//! A [`ToolDescriptor`] is the static definition handed to the host. A
//! [`DiscoveredTool`] is the host's record of a tool it found on disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Tool Descriptor
// ============================================================================

/// Static definition of a tool the host can display or launch.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Unique identifier, stable across releases.
    pub id: &'static str,
    /// Human-readable display name.
    pub name: &'static str,
    /// Optional short name for compact UI.
    pub short_name: Option<&'static str>,
    /// Logo file shipped with the extension.
    pub logo: Option<&'static str>,
    /// Executable path, `/`-separated, relative to the game root when `relative`.
    pub executable: &'static str,
    /// Files that must exist for the tool to count as installed.
    pub required_files: &'static [&'static str],
    /// Launch arguments.
    pub parameters: &'static [&'static str],
    /// Run through the shell.
    pub shell: bool,
    /// Paths are relative to the game root.
    pub relative: bool,
    /// Nothing else may run while this tool runs.
    pub exclusive: bool,
}

impl ToolDescriptor {
    /// Resolves the executable under `game_root` using native separators.
    pub fn executable_path(&self, game_root: &Path) -> PathBuf {
        join_relative(game_root, self.executable)
    }

    /// Base filename of the executable, e.g. `redMod.exe`.
    pub fn executable_name(&self) -> &'static str {
        base_name(self.executable)
    }
}

/// Joins a `/`-separated relative path onto `root` component by component.
pub fn join_relative(root: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |acc, part| acc.join(part))
}

/// Last component of a path string, accepting both separator styles.
///
/// Hosts on Windows record paths with `\`, which `Path::file_name` does not
/// split on elsewhere.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// ============================================================================
// Discovered Tool
// ============================================================================

/// A tool the host has recorded as installed for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredTool {
    /// Tool id the host keyed this record under.
    pub id: String,
    /// Display name, if the host kept one.
    #[serde(default)]
    pub name: Option<String>,
    /// Absolute path to the executable. Hosts may leave this unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl DiscoveredTool {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            path: Some(path.into()),
        }
    }

    /// Base filename of the recorded executable.
    pub fn executable_name(&self) -> Option<&str> {
        self.path.as_deref().map(base_name)
    }
}
