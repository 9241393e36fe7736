//! Configuration module for REDmodding.
//!
//! The persisted user settings live in the host's store under `settings.redmod`.
//! This module owns their schema and the actions that change them.

mod settings;

pub use settings::{
    load_document_from, save_document_to, state_file_path,
    ProfileRedmodState, RedmodSettings, SettingsAction, SettingsDocument, SettingsSection,
    SETTINGS_PATH,
};
