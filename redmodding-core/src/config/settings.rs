//! User settings for REDmod integration.
//!
//! Settings are persisted as JSON. The layout matches the host store:
//!
//! ```json
//! { "settings": { "redmod": { "redModEnable": true, "autoRun": false, "archiveAutoConvert": false } } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::SettingsError;

/// Path of the REDmod settings inside the host store.
pub const SETTINGS_PATH: &[&str] = &["settings", "redmod"];

/// Subdirectory under the OS config folder used by standalone hosts.
const STATE_DIR: &str = "redmodding";

// =============================================================================
// Settings
// =============================================================================

/// REDmod settings - persisted as camelCase JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedmodSettings {
    /// Enable full REDmod capabilities.
    pub red_mod_enable: bool,

    /// Run REDmod deploy on deployment events (if necessary).
    pub auto_run: bool,

    /// Convert plain archive mods into REDmods on install.
    pub archive_auto_convert: bool,
}

/// Per-profile REDmod bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRedmodState {
    /// A REDmod deploy must run before the next game launch.
    pub need_to_run: bool,
}

/// State changes the REDmod integration can request from the host store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SettingsAction {
    SetRedModEnable(bool),
    SetAutoRun(bool),
    SetArchiveAutoConvert(bool),
    SetNeedToRun { profile_id: String, need: bool },
}

impl SettingsAction {
    /// Store path and value this action writes, for hosts that keep a raw
    /// JSON tree.
    pub fn store_write(&self) -> (Vec<String>, bool) {
        let redmod = |key: &str| {
            let mut path: Vec<String> = SETTINGS_PATH.iter().map(|s| s.to_string()).collect();
            path.push(key.to_string());
            path
        };
        match self {
            Self::SetRedModEnable(on) => (redmod("redModEnable"), *on),
            Self::SetAutoRun(on) => (redmod("autoRun"), *on),
            Self::SetArchiveAutoConvert(on) => (redmod("archiveAutoConvert"), *on),
            Self::SetNeedToRun { profile_id, need } => (
                vec![
                    "profiles".to_string(),
                    profile_id.clone(),
                    "needToRun".to_string(),
                ],
                *need,
            ),
        }
    }
}

impl RedmodSettings {
    /// Applies a settings action. Profile-scoped actions are ignored here.
    pub fn apply(&mut self, action: &SettingsAction) {
        match action {
            SettingsAction::SetRedModEnable(on) => self.red_mod_enable = *on,
            SettingsAction::SetAutoRun(on) => self.auto_run = *on,
            SettingsAction::SetArchiveAutoConvert(on) => self.archive_auto_convert = *on,
            SettingsAction::SetNeedToRun { .. } => {}
        }
    }
}

// =============================================================================
// Settings Document
// =============================================================================

/// The slice of host state a standalone host keeps on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub settings: SettingsSection,

    /// Per-profile state, keyed by profile id.
    pub profiles: BTreeMap<String, ProfileRedmodState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    pub redmod: RedmodSettings,
}

impl SettingsDocument {
    /// Applies an action to whichever part of the document it targets.
    pub fn apply(&mut self, action: &SettingsAction) {
        match action {
            SettingsAction::SetNeedToRun { profile_id, need } => {
                self.profiles
                    .entry(profile_id.clone())
                    .or_default()
                    .need_to_run = *need;
            }
            other => self.settings.redmod.apply(other),
        }
    }

    /// Reads a value by store path, e.g. `["settings", "redmod", "autoRun"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for key in path {
            value = value.get_mut(*key)?.take();
        }
        Some(value)
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// Default location of the standalone state file.
///
/// Path: `{config}/redmodding/state.json`
pub fn state_file_path() -> Result<PathBuf, SettingsError> {
    dirs::config_dir()
        .map(|dir| dir.join(STATE_DIR).join("state.json"))
        .ok_or(SettingsError::NoConfigDir)
}

/// Loads the settings document from a specific path.
///
/// A missing file yields defaults. A corrupt file is logged and replaced by
/// defaults.
pub fn load_document_from(path: &Path) -> Result<SettingsDocument, SettingsError> {
    if !path.exists() {
        debug!("Settings not found at {}, using defaults", path.display());
        return Ok(SettingsDocument::default());
    }

    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<SettingsDocument>(&content) {
        Ok(doc) => Ok(doc),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to parse settings, using defaults"
            );
            Ok(SettingsDocument::default())
        }
    }
}

/// Saves the settings document to a specific path, creating parent dirs.
pub fn save_document_to(doc: &SettingsDocument, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    debug!("Settings saved to {}", path.display());
    Ok(())
}
