//! REDmod readiness on game setup.
//!
//! Runs every time the host activates the game:
//!
//! 1. Ensure the mod and generated-file directories exist (best effort).
//! 2. Ensure the load order directory exists (best effort).
//! 3. Stat `REDprelauncher.exe` and `tools/redmod/bin/redMod.exe` together.
//! 4. If both are there, done. Otherwise work out which store owns the game
//!    and offer the REDmod DLC from that store.
//!
//! # Architecture
//!
//! - `directories`: required directories and the best-effort preparer
//! - `prompt`: the acquisition dialog and its follow-up

pub mod directories;
pub mod prompt;

pub use directories::{
    prepare_directories, Criticality, DirectoryOutcome, RequiredDir, LOAD_ORDER_DIRS,
    MODDING_DIRS, REDMODDING_REQUIRED_DIR_FOR_GENERATED_FILES, REDMODDING_REQUIRED_DIR_FOR_MODS,
    V2077_LOAD_ORDER_DIR,
};
pub use prompt::prompt_redmod_install;

use futures::future::join;
use serde_json::json;

use crate::error::ReadinessError;
use crate::game::{EPICAPP_ID, GOGAPP_ID, STEAMAPP_ID};
use crate::host::{Discovery, HostContext, LogLevel, PromptChoice};
use crate::storefront::{resolve_storefront, StorefrontInfo};
use crate::tools::{REDLAUNCHER, REDMOD_DEPLOY};

/// Store app ids queried when REDmod is missing.
const DLC_STORE_APP_IDS: [&str; 3] = [GOGAPP_ID, STEAMAPP_ID, EPICAPP_ID];

/// How the tool check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessStatus {
    /// Both REDmod executables are installed.
    ToolPresent,
    /// REDmod was missing and the DLC was offered.
    AcquisitionOffered {
        storefront: StorefrontInfo,
        choice: PromptChoice,
    },
}

/// Everything the setup hook did.
#[derive(Debug)]
pub struct ReadinessReport {
    pub directories: Vec<DirectoryOutcome>,
    pub status: ReadinessStatus,
}

impl ReadinessReport {
    /// Directories that could not be prepared.
    pub fn failed_directories(&self) -> impl Iterator<Item = &DirectoryOutcome> {
        self.directories.iter().filter(|o| !o.is_ok())
    }
}

/// Setup hook the host calls on game activation.
pub async fn setup_hook(
    ctx: &HostContext,
    discovery: &Discovery,
) -> Result<ReadinessReport, ReadinessError> {
    ctx.log(LogLevel::Info, "Checking for REDmod install");
    prepare_for_modding_with_redmodding(ctx, discovery).await
}

/// Prepares the game directory for REDmodding and offers REDmod if missing.
///
/// Directory failures are only logged. The one error that escapes is a
/// failed store lookup while REDmod is missing.
pub async fn prepare_for_modding_with_redmodding(
    ctx: &HostContext,
    discovery: &Discovery,
) -> Result<ReadinessReport, ReadinessError> {
    let game_root = discovery.path.as_path();

    let mut directories = prepare_directories(ctx, game_root, &MODDING_DIRS).await;
    directories.extend(prepare_directories(ctx, game_root, &LOAD_ORDER_DIRS).await);

    let launcher_path = REDLAUNCHER.executable_path(game_root);
    let redmod_path = REDMOD_DEPLOY.executable_path(game_root);

    let (launcher, redmod) = join(
        ctx.fs.stat_path(&launcher_path),
        ctx.fs.stat_path(&redmod_path),
    )
    .await;

    match (launcher, redmod) {
        (Ok(()), Ok(())) => {
            ctx.log(LogLevel::Debug, "REDmod is installed");
            return Ok(ReadinessReport {
                directories,
                status: ReadinessStatus::ToolPresent,
            });
        }
        (launcher, redmod) => {
            let missing: Vec<String> = [launcher.err(), redmod.err()]
                .into_iter()
                .flatten()
                .map(|e| e.to_string())
                .collect();
            ctx.log_with(
                LogLevel::Warn,
                "REDmod not found for Cyberpunk 2077, offering the download...",
                json!({ "missing": missing }),
            );
        }
    }

    let game = match ctx
        .stores
        .find_installed_game_by_store_app_ids(&DLC_STORE_APP_IDS)
        .await
    {
        Ok(game) => game,
        Err(e) => {
            ctx.log_with(
                LogLevel::Warn,
                "Unable to determine the game store, not offering REDmod",
                json!({ "error": e.to_string() }),
            );
            return Err(ReadinessError::StoreDetection(e));
        }
    };

    if game.game_path != discovery.path {
        ctx.log_with(
            LogLevel::Warn,
            "Cyberpunk discovery doesn't match auto-detected path",
            json!({
                "discovery": discovery.path.display().to_string(),
                "discoveryStore": discovery.store,
                "autoDetect": game.game_path.display().to_string(),
                "autoDetectStore": game.game_store_id,
            }),
        );
    }

    let storefront = resolve_storefront(game.game_store_id.as_deref());
    let choice = prompt_redmod_install(ctx, &storefront).await;

    Ok(ReadinessReport {
        directories,
        status: ReadinessStatus::AcquisitionOffered { storefront, choice },
    })
}
