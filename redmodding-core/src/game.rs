//! Static metadata for Cyberpunk 2077.
//!
//! Ids, store app ids and the game definition the host registers. Plus the two
//! store-backed queries registration needs: where the game lives, and whether
//! it must be started through a launcher.

use std::path::PathBuf;
use tracing::debug;

use crate::error::StoreDetectionError;
use crate::host::StoreDetector;
use crate::tools::{catalog, ToolDescriptor};

// ============================================================================
// Identifiers
// ============================================================================

pub const GAME_ID: &str = "cyberpunk2077";
pub const GAME_NAME: &str = "Cyberpunk 2077";

pub const STEAMAPP_ID: &str = "1091500";
pub const GOGAPP_ID: &str = "1423049311";
pub const EPICAPP_ID: &str = "77f2b98e2cef40c8a7437518bf420e47";

/// Store app ids in the order the query path tries them.
pub const STORE_APP_IDS: [&str; 3] = [STEAMAPP_ID, GOGAPP_ID, EPICAPP_ID];

/// Whether `game_id` is the game this crate manages.
pub fn is_supported(game_id: &str) -> bool {
    game_id == GAME_ID
}

// ============================================================================
// Game Definition
// ============================================================================

/// Registration data handed to the host.
#[derive(Debug, Clone)]
pub struct GameDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
    pub executable: &'static str,
    pub required_files: &'static [&'static str],
    pub merge_mods: bool,
    pub supports_symlinks: bool,
    pub steam_app_id: &'static str,
    pub gog_app_id: &'static str,
    pub epic_app_id: &'static str,
}

pub const GAME_DEFINITION: GameDefinition = GameDefinition {
    id: GAME_ID,
    name: GAME_NAME,
    logo: "gameart.png",
    executable: "bin/x64/Cyberpunk2077.exe",
    required_files: &["bin/x64/Cyberpunk2077.exe"],
    merge_mods: true,
    supports_symlinks: false,
    steam_app_id: STEAMAPP_ID,
    gog_app_id: GOGAPP_ID,
    epic_app_id: EPICAPP_ID,
};

impl GameDefinition {
    /// Environment variables the game process gets.
    pub fn environment(&self) -> Vec<(&'static str, &'static str)> {
        vec![("SteamAPPId", self.steam_app_id)]
    }

    /// Tools registered alongside the game.
    pub fn supported_tools(&self) -> Vec<&'static ToolDescriptor> {
        catalog::supported_tools()
    }
}

// ============================================================================
// Store Queries
// ============================================================================

/// Launcher the game must be started through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherRequirement {
    pub launcher: &'static str,
    pub add_info: &'static str,
}

/// Asks the store helper where the game is installed.
pub async fn find_game(stores: &dyn StoreDetector) -> Result<PathBuf, StoreDetectionError> {
    let entry = stores
        .find_installed_game_by_store_app_ids(&STORE_APP_IDS)
        .await?;
    debug!(path = %entry.game_path.display(), store = ?entry.game_store_id, "Game found");
    Ok(entry.game_path)
}

/// GOG installs have to go through Galaxy.
pub async fn requires_launcher(stores: &dyn StoreDetector) -> Option<LauncherRequirement> {
    if stores.is_game_installed(GOGAPP_ID, "gog").await {
        Some(LauncherRequirement {
            launcher: "gog",
            add_info: GOGAPP_ID,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStores;

    #[test]
    fn test_is_supported() {
        assert!(is_supported("cyberpunk2077"));
        assert!(!is_supported("skyrimse"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_game_definition() {
        assert!(GAME_DEFINITION
            .required_files
            .contains(&GAME_DEFINITION.executable));
        assert_eq!(GAME_DEFINITION.environment(), vec![("SteamAPPId", STEAMAPP_ID)]);
        assert_eq!(GAME_DEFINITION.supported_tools()[0].id, "CSVMerge");
    }

    #[tokio::test]
    async fn test_find_game_returns_store_path() {
        let stores = FakeStores::found("/games/cp", Some("steam"));
        let path = find_game(&stores).await.unwrap();
        assert_eq!(path, PathBuf::from("/games/cp"));
        assert_eq!(stores.queries(), vec![STORE_APP_IDS.map(String::from).to_vec()]);
    }

    #[tokio::test]
    async fn test_find_game_not_found() {
        let stores = FakeStores::failing();
        assert!(find_game(&stores).await.is_err());
    }

    #[tokio::test]
    async fn test_requires_launcher_only_for_gog() {
        let gog = FakeStores::found("/games/cp", Some("gog"));
        assert_eq!(
            requires_launcher(&gog).await,
            Some(LauncherRequirement {
                launcher: "gog",
                add_info: GOGAPP_ID
            })
        );

        let steam = FakeStores::found("/games/cp", Some("steam"));
        assert_eq!(requires_launcher(&steam).await, None);
    }
}
