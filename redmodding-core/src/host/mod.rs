//! Boundary to the mod-management host.
//!
//! Every capability the REDmod logic needs from the host is a trait here, and
//! [`HostContext`] bundles them so each operation receives its collaborators
//! explicitly. Host state is read fresh on every call; nothing in this crate
//! caches a snapshot.
//!
//! - `HostState`: store reads and dispatch
//! - `HostLog`: the host logger (defaults to `tracing`)
//! - `Translator`: localization
//! - `Filesystem`: stat and ensure-writable-directory
//! - `StoreDetector`: locating the game in Steam, GOG or Epic
//! - `UrlOpener`: launching web URLs and store deep links
//! - `InstallPrompter`: the user-facing acquisition dialog

mod fs;
mod opener;

pub use fs::TokioFilesystem;
pub use opener::BrowserOpener;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SettingsAction;
use crate::error::{FsError, OpenError, StoreDetectionError};
use crate::storefront::StorefrontInfo;
use crate::tools::DiscoveredTool;

// ============================================================================
// Host Records
// ============================================================================

/// Where the host found the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discovery {
    /// Absolute game root.
    pub path: PathBuf,
    /// Store the host attributed the install to, if known.
    #[serde(default)]
    pub store: Option<String>,
}

impl Discovery {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: None,
        }
    }
}

/// Answer of the store-detection helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreGameEntry {
    pub game_path: PathBuf,
    /// `steam`, `gog`, `epic`, or anything else the host knows about.
    pub game_store_id: Option<String>,
}

/// Log levels the host logger understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// What the user picked in the acquisition dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptChoice {
    /// Open the store client on the REDmod page.
    OpenStore,
    /// Open the REDmod page in the browser.
    OpenWebPage,
    Dismiss,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Read-mostly view of the host's global state store.
pub trait HostState: Send + Sync {
    /// Id of the game currently being managed.
    fn active_game_id(&self) -> Option<String>;

    /// Id of the active profile for the current game.
    fn active_profile_id(&self) -> Option<String>;

    /// Tools the host discovered for `game_id`, keyed by tool id.
    fn discovered_tools(&self, game_id: &str) -> BTreeMap<String, Option<DiscoveredTool>>;

    /// Raw setting lookup by store path.
    fn read_setting(&self, path: &[&str]) -> Option<serde_json::Value>;

    /// Sends a state change to the host store.
    fn dispatch(&self, action: SettingsAction);
}

/// Reads a boolean setting, falling back to `default` when unset or not a bool.
pub fn read_bool_setting(state: &dyn HostState, path: &[&str], default: bool) -> bool {
    state
        .read_setting(path)
        .and_then(|value| value.as_bool())
        .unwrap_or(default)
}

/// The host logger.
pub trait HostLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: Option<&serde_json::Value>) {
        let context = context.map(|c| c.to_string()).unwrap_or_default();
        match level {
            LogLevel::Debug => tracing::debug!(context = %context, "{}", message),
            LogLevel::Info => tracing::info!(context = %context, "{}", message),
            LogLevel::Warn => tracing::warn!(context = %context, "{}", message),
            LogLevel::Error => tracing::error!(context = %context, "{}", message),
        }
    }
}

/// Host logger backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl HostLog for TracingLog {}

pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Returns keys untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Succeeds when `path` exists.
    async fn stat_path(&self, path: &std::path::Path) -> Result<(), FsError>;

    /// Creates `path` if needed and verifies it can be written to.
    async fn ensure_writable_directory(&self, path: &std::path::Path) -> Result<(), FsError>;
}

#[async_trait]
pub trait StoreDetector: Send + Sync {
    /// Finds the game installed under any of `app_ids`, trying them in order.
    async fn find_installed_game_by_store_app_ids(
        &self,
        app_ids: &[&str],
    ) -> Result<StoreGameEntry, StoreDetectionError>;

    /// Whether the game is installed through `store_id` under `app_id`.
    async fn is_game_installed(&self, app_id: &str, store_id: &str) -> bool {
        match self.find_installed_game_by_store_app_ids(&[app_id]).await {
            Ok(entry) => entry.game_store_id.as_deref() == Some(store_id),
            Err(_) => false,
        }
    }
}

#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), OpenError>;
}

#[async_trait]
pub trait InstallPrompter: Send + Sync {
    /// Shows the "REDmod is missing" dialog for `storefront`.
    async fn prompt_install(&self, storefront: &StorefrontInfo) -> PromptChoice;
}

// ============================================================================
// Host Context
// ============================================================================

/// Everything an operation may touch, passed explicitly into every call.
#[derive(Clone)]
pub struct HostContext {
    pub state: Arc<dyn HostState>,
    pub log: Arc<dyn HostLog>,
    pub translator: Arc<dyn Translator>,
    pub fs: Arc<dyn Filesystem>,
    pub stores: Arc<dyn StoreDetector>,
    pub opener: Arc<dyn UrlOpener>,
    pub prompter: Arc<dyn InstallPrompter>,
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext").finish_non_exhaustive()
    }
}

impl HostContext {
    /// Builds a context with the real filesystem, browser and tracing logger.
    pub fn new(
        state: Arc<dyn HostState>,
        stores: Arc<dyn StoreDetector>,
        prompter: Arc<dyn InstallPrompter>,
    ) -> Self {
        Self {
            state,
            log: Arc::new(TracingLog),
            translator: Arc::new(IdentityTranslator),
            fs: Arc::new(TokioFilesystem),
            stores,
            opener: Arc::new(BrowserOpener),
            prompter,
        }
    }

    /// Replaces the logger, mirroring how the host injects its log handle.
    pub fn with_log(mut self, log: Arc<dyn HostLog>) -> Self {
        self.log = log;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_fs(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.log.log(level, message, None);
    }

    pub fn log_with(&self, level: LogLevel, message: &str, context: serde_json::Value) {
        self.log.log(level, message, Some(&context));
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }
}
