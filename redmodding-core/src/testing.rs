//! Fake host capabilities for unit tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::SettingsAction;
use crate::error::{FsError, OpenError, StoreDetectionError};
use crate::host::{
    Filesystem, HostContext, HostLog, HostState, IdentityTranslator, InstallPrompter, LogLevel,
    PromptChoice, StoreDetector, StoreGameEntry, TokioFilesystem, UrlOpener,
};
use crate::storefront::StorefrontInfo;
use crate::tools::DiscoveredTool;

// ============================================================================
// State
// ============================================================================

#[derive(Default)]
struct FakeStateInner {
    active_game: Option<String>,
    active_profile: Option<String>,
    tools: BTreeMap<String, BTreeMap<String, Option<DiscoveredTool>>>,
    /// Raw store tree; keys nobody wrote are absent.
    store: serde_json::Value,
    dispatched: Vec<SettingsAction>,
}

/// In-memory host store that records dispatched actions.
#[derive(Default)]
pub struct FakeState {
    inner: Mutex<FakeStateInner>,
}

impl FakeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_game(self, game_id: &str) -> Self {
        self.inner.lock().unwrap().active_game = Some(game_id.to_string());
        self
    }

    pub fn active_profile(self, profile_id: &str) -> Self {
        self.inner.lock().unwrap().active_profile = Some(profile_id.to_string());
        self
    }

    pub fn auto_run(self, on: bool) -> Self {
        write_store(
            &mut self.inner.lock().unwrap().store,
            &SettingsAction::SetAutoRun(on),
        );
        self
    }

    pub fn with_tool(self, game_id: &str, tool_id: &str, tool: Option<DiscoveredTool>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .tools
            .entry(game_id.to_string())
            .or_default()
            .insert(tool_id.to_string(), tool);
        self
    }

    pub fn dispatched(&self) -> Vec<SettingsAction> {
        self.inner.lock().unwrap().dispatched.clone()
    }
}

impl HostState for FakeState {
    fn active_game_id(&self) -> Option<String> {
        self.inner.lock().unwrap().active_game.clone()
    }

    fn active_profile_id(&self) -> Option<String> {
        self.inner.lock().unwrap().active_profile.clone()
    }

    fn discovered_tools(&self, game_id: &str) -> BTreeMap<String, Option<DiscoveredTool>> {
        self.inner
            .lock()
            .unwrap()
            .tools
            .get(game_id)
            .cloned()
            .unwrap_or_default()
    }

    fn read_setting(&self, path: &[&str]) -> Option<serde_json::Value> {
        let inner = self.inner.lock().unwrap();
        let mut value = &inner.store;
        for key in path {
            value = value.get(*key)?;
        }
        Some(value.clone())
    }

    fn dispatch(&self, action: SettingsAction) {
        let mut inner = self.inner.lock().unwrap();
        write_store(&mut inner.store, &action);
        inner.dispatched.push(action);
    }
}

fn write_store(store: &mut serde_json::Value, action: &SettingsAction) {
    let (path, value) = action.store_write();
    let mut node = store;
    for key in &path {
        if !node.is_object() {
            *node = serde_json::json!({});
        }
        node = node
            .as_object_mut()
            .unwrap()
            .entry(key.clone())
            .or_insert(serde_json::Value::Null);
    }
    *node = serde_json::Value::Bool(value);
}

// ============================================================================
// Log
// ============================================================================

#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LogLevel, String, Option<serde_json::Value>)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(level, message, _)| (*level, message.clone()))
            .collect()
    }

    /// Context of the first entry whose message contains `needle`.
    pub fn context_of(&self, needle: &str) -> Option<serde_json::Value> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(_, message, _)| message.contains(needle))
            .and_then(|(_, _, context)| context.clone())
    }
}

impl HostLog for RecordingLog {
    fn log(&self, level: LogLevel, message: &str, context: Option<&serde_json::Value>) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string(), context.cloned()));
    }
}

// ============================================================================
// Filesystem
// ============================================================================

#[derive(Default)]
struct ScriptedFsInner {
    fail_dirs: Vec<String>,
    fail_all_dirs: bool,
    files: HashSet<PathBuf>,
    ensured: Vec<PathBuf>,
}

/// Filesystem that never touches disk. Directories succeed unless scripted to
/// fail by last component; stat succeeds only for registered files.
#[derive(Clone, Default)]
pub struct ScriptedFs {
    inner: Arc<Mutex<ScriptedFsInner>>,
}

impl ScriptedFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_dir(self, last_component: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .fail_dirs
            .push(last_component.to_string());
        self
    }

    pub fn fail_all_dirs(self) -> Self {
        self.inner.lock().unwrap().fail_all_dirs = true;
        self
    }

    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.inner.lock().unwrap().files.insert(path.into());
        self
    }

    /// Every directory an ensure was attempted for.
    pub fn ensured(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().ensured.clone()
    }
}

#[async_trait]
impl Filesystem for ScriptedFs {
    async fn stat_path(&self, path: &Path) -> Result<(), FsError> {
        if self.inner.lock().unwrap().files.contains(path) {
            Ok(())
        } else {
            Err(FsError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    async fn ensure_writable_directory(&self, path: &Path) -> Result<(), FsError> {
        let mut inner = self.inner.lock().unwrap();
        inner.ensured.push(path.to_path_buf());
        let fails = inner.fail_all_dirs
            || inner
                .fail_dirs
                .iter()
                .any(|name| path.ends_with(name.as_str()));
        if fails {
            Err(FsError::NotWritable {
                path: path.to_path_buf(),
            })
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Stores
// ============================================================================

/// Store detector with a fixed answer that records every query.
pub struct FakeStores {
    answer: Option<StoreGameEntry>,
    queries: Mutex<Vec<Vec<String>>>,
}

impl FakeStores {
    pub fn found(path: impl Into<PathBuf>, store: Option<&str>) -> Self {
        Self {
            answer: Some(StoreGameEntry {
                game_path: path.into(),
                game_store_id: store.map(String::from),
            }),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<Vec<String>> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreDetector for FakeStores {
    async fn find_installed_game_by_store_app_ids(
        &self,
        app_ids: &[&str],
    ) -> Result<StoreGameEntry, StoreDetectionError> {
        let ids: Vec<String> = app_ids.iter().map(|id| id.to_string()).collect();
        self.queries.lock().unwrap().push(ids.clone());
        self.answer
            .clone()
            .ok_or(StoreDetectionError::NotFound(ids))
    }
}

// ============================================================================
// Opener / Prompter
// ============================================================================

/// Records successfully opened URLs. URLs with `fail_prefix` fail.
#[derive(Default)]
pub struct RecordingOpener {
    fail_prefix: Option<String>,
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_prefix: Some(prefix.to_string()),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<(), OpenError> {
        if let Some(prefix) = &self.fail_prefix {
            if url.starts_with(prefix.as_str()) {
                return Err(OpenError::new(url, "no handler"));
            }
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub struct RecordingPrompter {
    answer: PromptChoice,
    prompted: Mutex<Vec<StorefrontInfo>>,
}

impl RecordingPrompter {
    pub fn new(answer: PromptChoice) -> Self {
        Self {
            answer,
            prompted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InstallPrompter for RecordingPrompter {
    async fn prompt_install(&self, storefront: &StorefrontInfo) -> PromptChoice {
        self.prompted.lock().unwrap().push(storefront.clone());
        self.answer
    }
}

// ============================================================================
// Test Host
// ============================================================================

/// A full set of fakes. Filesystem defaults to the real one.
pub struct TestHost {
    pub state: Arc<FakeState>,
    pub log: Arc<RecordingLog>,
    pub fs: Arc<dyn Filesystem>,
    pub stores: Arc<FakeStores>,
    pub opener: Arc<RecordingOpener>,
    pub prompter: Arc<RecordingPrompter>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(FakeState::new()),
            log: Arc::new(RecordingLog::default()),
            fs: Arc::new(TokioFilesystem),
            stores: Arc::new(FakeStores::failing()),
            opener: Arc::new(RecordingOpener::new()),
            prompter: Arc::new(RecordingPrompter::new(PromptChoice::Dismiss)),
        }
    }

    pub fn with_state(mut self, state: FakeState) -> Self {
        self.state = Arc::new(state);
        self
    }

    pub fn with_fs(mut self, fs: impl Filesystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    pub fn with_stores(mut self, stores: FakeStores) -> Self {
        self.stores = Arc::new(stores);
        self
    }

    pub fn with_opener(mut self, opener: RecordingOpener) -> Self {
        self.opener = Arc::new(opener);
        self
    }

    pub fn answering(mut self, choice: PromptChoice) -> Self {
        self.prompter = Arc::new(RecordingPrompter::new(choice));
        self
    }

    pub fn ctx(&self) -> HostContext {
        HostContext {
            state: self.state.clone(),
            log: self.log.clone(),
            translator: Arc::new(IdentityTranslator),
            fs: self.fs.clone(),
            stores: self.stores.clone(),
            opener: self.opener.clone(),
            prompter: self.prompter.clone(),
        }
    }

    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.log.entries()
    }

    pub fn prompted(&self) -> Vec<StorefrontInfo> {
        self.prompter.prompted.lock().unwrap().clone()
    }
}
