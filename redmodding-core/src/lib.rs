//! REDmodding Core Library
//!
//! This crate provides the Cyberpunk 2077 side of REDmod support inside a
//! mod-management host. It includes:
//!
//! - Static game and tool metadata (REDLauncher, REDmod Deploy, CSVMerge)
//! - Lookup of the REDmod tool among the host's discovered tools
//! - Best-effort preparation of the directories REDmodding needs
//! - Storefront resolution for offering the REDmod DLC
//! - The setup hook that ties the above together on game activation
//! - The auto-deploy settings action (condition / action / check)
//! - Persisted REDmod settings and feature switches
//!
//! The host is reached only through the traits in [`host`], bundled into a
//! [`HostContext`] that is passed into every operation.

pub mod config;
pub mod error;
pub mod features;
pub mod game;
pub mod host;
pub mod protocol;
pub mod readiness;
pub mod storefront;
pub mod tools;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use config::{RedmodSettings, SettingsAction, SettingsDocument};
pub use error::{FsError, OpenError, ReadinessError, SettingsError, StoreDetectionError};
pub use features::{Feature, FeatureSet};
pub use game::{is_supported, GAME_DEFINITION, GAME_ID};

// Re-export host boundary
pub use host::{
    BrowserOpener, Discovery, Filesystem, HostContext, HostLog, HostState, InstallPrompter,
    LogLevel, PromptChoice, StoreDetector, StoreGameEntry, TokioFilesystem, TracingLog,
    Translator, UrlOpener,
};

// Re-export protocol
pub use protocol::{
    check_state, ActionType, AutoDeploy, CheckState, Diagnostic, RegisteredAction,
    SettingsPanelAction, Severity,
};

// Re-export readiness workflow
pub use readiness::{setup_hook, ReadinessReport, ReadinessStatus};

// Re-export storefronts and tools
pub use storefront::{resolve_storefront, Storefront, StorefrontInfo};
pub use tools::{find_redmod_tool, redmodding_tools, DiscoveredTool, ToolDescriptor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
