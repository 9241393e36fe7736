//! Local stand-in for the mod-management host.
//!
//! State comes from a JSON settings document on disk and from looking at the
//! game directory itself: a tool counts as discovered when its executable
//! exists under the game root.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use redmodding_core::config::{load_document_from, save_document_to};
use redmodding_core::tools::{REDLAUNCHER, REDMOD_DEPLOY};
use redmodding_core::{
    DiscoveredTool, HostState, SettingsAction, SettingsDocument, StoreDetectionError,
    StoreDetector, StoreGameEntry, Storefront, GAME_ID,
};

/// Profile id used by the local host.
pub const LOCAL_PROFILE: &str = "default";

pub struct LocalState {
    game_dir: PathBuf,
    state_path: PathBuf,
    doc: Mutex<SettingsDocument>,
}

impl LocalState {
    pub fn load(game_dir: &Path, state_path: &Path) -> Result<Self> {
        let doc = load_document_from(state_path)
            .with_context(|| format!("Failed to load settings from {}", state_path.display()))?;
        Ok(Self {
            game_dir: game_dir.to_path_buf(),
            state_path: state_path.to_path_buf(),
            doc: Mutex::new(doc),
        })
    }

    pub fn document(&self) -> SettingsDocument {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SettingsDocument> {
        self.doc.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HostState for LocalState {
    fn active_game_id(&self) -> Option<String> {
        Some(GAME_ID.to_string())
    }

    fn active_profile_id(&self) -> Option<String> {
        Some(LOCAL_PROFILE.to_string())
    }

    fn discovered_tools(&self, game_id: &str) -> BTreeMap<String, Option<DiscoveredTool>> {
        if game_id != GAME_ID {
            return BTreeMap::new();
        }

        [&REDLAUNCHER, &REDMOD_DEPLOY]
            .into_iter()
            .map(|tool| {
                let path = tool.executable_path(&self.game_dir);
                let discovered = path.exists().then(|| DiscoveredTool {
                    id: tool.id.to_string(),
                    name: Some(tool.name.to_string()),
                    path: Some(path.display().to_string()),
                });
                debug!(tool = tool.id, found = discovered.is_some(), "Tool discovery");
                (tool.id.to_string(), discovered)
            })
            .collect()
    }

    fn read_setting(&self, path: &[&str]) -> Option<serde_json::Value> {
        self.lock().get_path(path)
    }

    fn dispatch(&self, action: SettingsAction) {
        let mut doc = self.lock();
        doc.apply(&action);
        if let Err(e) = save_document_to(&doc, &self.state_path) {
            warn!(error = %e, "Failed to persist settings");
        }
    }
}

/// Store detector that always places the game at the given directory.
pub struct LocalStores {
    game_dir: PathBuf,
    store: Option<Storefront>,
}

impl LocalStores {
    pub fn new(game_dir: &Path, store: Option<Storefront>) -> Self {
        Self {
            game_dir: game_dir.to_path_buf(),
            store,
        }
    }
}

#[async_trait]
impl StoreDetector for LocalStores {
    async fn find_installed_game_by_store_app_ids(
        &self,
        _app_ids: &[&str],
    ) -> Result<StoreGameEntry, StoreDetectionError> {
        Ok(StoreGameEntry {
            game_path: self.game_dir.clone(),
            game_store_id: self.store.map(|s| s.as_str().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redmodding_core::tools::find_redmod_tool;
    use tempfile::TempDir;

    #[test]
    fn test_discovers_redmod_when_present() {
        let temp = TempDir::new().unwrap();
        let state = LocalState::load(temp.path(), &temp.path().join("state.json")).unwrap();
        assert!(find_redmod_tool(&state, GAME_ID).is_none());

        let bin = temp.path().join("tools").join("redmod").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("redMod.exe"), b"").unwrap();

        assert!(find_redmod_tool(&state, GAME_ID).is_some());
    }

    #[test]
    fn test_dispatch_persists() {
        let temp = TempDir::new().unwrap();
        let state_path = temp.path().join("state.json");
        let state = LocalState::load(temp.path(), &state_path).unwrap();

        state.dispatch(SettingsAction::SetAutoRun(true));

        let reloaded = LocalState::load(temp.path(), &state_path).unwrap();
        assert!(reloaded.document().settings.redmod.auto_run);
    }

    #[tokio::test]
    async fn test_local_stores_answers_pinned_store() {
        let stores = LocalStores::new(Path::new("/cp"), Some(Storefront::Gog));
        let entry = stores
            .find_installed_game_by_store_app_ids(&["1423049311"])
            .await
            .unwrap();
        assert_eq!(entry.game_store_id.as_deref(), Some("gog"));
        assert_eq!(entry.game_path, PathBuf::from("/cp"));
    }
}
