//! Auto-deploy settings action: condition, action, check.
//!
//! The host polls `condition` (often, e.g. on every render), invokes `action`
//! only after `condition` said yes, and runs `check` as a periodic health
//! check. All three re-read host state on every call and keep no memory.

pub mod diagnostic;

pub use diagnostic::{Description, Diagnostic, DiagnosticReason, Severity};

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::config::SettingsAction;
use crate::features::{Feature, FeatureSet};
use crate::game::is_supported;
use crate::host::{read_bool_setting, HostContext, HostLog, LogLevel};
use crate::tools::find_redmod_tool;

/// Store path of the auto-run toggle.
pub const AUTO_RUN_SETTING: &[&str] = &["settings", "redmod", "autoRun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    AutoRunDeploy,
}

/// States `check` can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckState {
    /// Auto-run is off.
    Disabled,
    /// The active game is not Cyberpunk 2077.
    UnsupportedGame,
    /// REDmod is recorded and its executable exists.
    ToolRecordedValid { path: String },
    /// REDmod is recorded but its executable is gone.
    ToolRecordedInvalid { path: String },
    /// The host has no REDmod record.
    ToolNotRecorded,
}

impl CheckState {
    /// Whether this state is a problem worth showing.
    pub fn diagnostic_reason(&self) -> Option<DiagnosticReason> {
        match self {
            Self::Disabled | Self::UnsupportedGame | Self::ToolRecordedValid { .. } => None,
            Self::ToolRecordedInvalid { .. } | Self::ToolNotRecorded => {
                Some(DiagnosticReason::Missing)
            }
        }
    }
}

// ============================================================================
// Protocol
// ============================================================================

/// A settings-panel action the host drives.
#[async_trait]
pub trait SettingsPanelAction: Send + Sync {
    fn action_type(&self) -> ActionType;

    /// Whether the action is currently available. Must be side-effect free.
    fn condition(&self, ctx: &HostContext, features: &FeatureSet, instance_ids: &[String])
        -> bool;

    /// Performs the action. Only called after `condition` returned true.
    fn action(&self, ctx: &HostContext, features: &FeatureSet, instance_ids: &[String]);

    /// Reports a problem, or `None` when everything is fine.
    async fn check(&self, ctx: &HostContext, features: &FeatureSet) -> Option<Diagnostic>;
}

/// Marks the active profile as needing a REDmod deploy run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDeploy;

#[async_trait]
impl SettingsPanelAction for AutoDeploy {
    fn action_type(&self) -> ActionType {
        ActionType::AutoRunDeploy
    }

    fn condition(
        &self,
        ctx: &HostContext,
        features: &FeatureSet,
        _instance_ids: &[String],
    ) -> bool {
        if !features.is_enabled(Feature::RedModding) {
            return false;
        }
        let Some(game_id) = ctx.state.active_game_id() else {
            return false;
        };
        is_supported(&game_id) && find_redmod_tool(ctx.state.as_ref(), &game_id).is_some()
    }

    fn action(&self, ctx: &HostContext, _features: &FeatureSet, _instance_ids: &[String]) {
        match ctx.state.active_profile_id() {
            Some(profile_id) => {
                ctx.log_with(
                    LogLevel::Debug,
                    "Marking profile for REDmod deploy",
                    json!({ "profile": profile_id }),
                );
                ctx.state.dispatch(SettingsAction::SetNeedToRun {
                    profile_id,
                    need: true,
                });
            }
            None => ctx.log(LogLevel::Warn, "No active profile, skipping REDmod deploy"),
        }
    }

    async fn check(&self, ctx: &HostContext, features: &FeatureSet) -> Option<Diagnostic> {
        check_state(ctx, features)
            .await
            .diagnostic_reason()
            .map(|reason| Diagnostic::failed(ctx, reason))
    }
}

/// Works out which [`CheckState`] the host is in right now.
pub async fn check_state(ctx: &HostContext, _features: &FeatureSet) -> CheckState {
    if !read_bool_setting(ctx.state.as_ref(), AUTO_RUN_SETTING, false) {
        return CheckState::Disabled;
    }

    let game_id = match ctx.state.active_game_id() {
        Some(id) if is_supported(&id) => id,
        _ => return CheckState::UnsupportedGame,
    };

    let Some(path) =
        find_redmod_tool(ctx.state.as_ref(), &game_id).and_then(|tool| tool.path)
    else {
        return CheckState::ToolNotRecorded;
    };

    match ctx.fs.stat_path(std::path::Path::new(&path)).await {
        Ok(()) => {
            ctx.log_with(LogLevel::Debug, "redmod tool setup", json!({ "path": path }));
            CheckState::ToolRecordedValid { path }
        }
        Err(e) => {
            ctx.log_with(
                LogLevel::Debug,
                "Recorded REDmod tool is missing on disk",
                json!({ "path": path, "error": e.to_string() }),
            );
            CheckState::ToolRecordedInvalid { path }
        }
    }
}

// ============================================================================
// Host Registration
// ============================================================================

/// A settings-panel action bound to a host, in the shape the host calls it.
///
/// Built once at registration: the host's own log handle is merged into the
/// context and the compiled-in feature set is attached, so each host call
/// only carries the selection it knows about.
#[derive(Clone)]
pub struct RegisteredAction {
    ctx: HostContext,
    features: FeatureSet,
    inner: Arc<dyn SettingsPanelAction>,
}

impl std::fmt::Debug for RegisteredAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredAction")
            .field("type", &self.inner.action_type())
            .field("features", &self.features)
            .finish()
    }
}

impl RegisteredAction {
    pub fn new(
        ctx: HostContext,
        host_log: Arc<dyn HostLog>,
        inner: Arc<dyn SettingsPanelAction>,
    ) -> Self {
        Self {
            ctx: ctx.with_log(host_log),
            features: FeatureSet::current(),
            inner,
        }
    }

    /// Overrides the feature set (mainly for hosts with their own switches).
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn action_type(&self) -> ActionType {
        self.inner.action_type()
    }

    pub fn condition(&self, instance_ids: &[String]) -> bool {
        self.inner.condition(&self.ctx, &self.features, instance_ids)
    }

    pub fn action(&self, instance_ids: &[String]) {
        self.inner.action(&self.ctx, &self.features, instance_ids)
    }

    pub async fn check(&self) -> Option<Diagnostic> {
        self.inner.check(&self.ctx, &self.features).await
    }
}
