//! Compile-time feature switches.
//!
//! The host passes a [`FeatureSet`] into every protocol call. It is only ever
//! read here; nothing in this crate flips a feature.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Known feature names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Full REDmod integration (auto-deploy and friends).
    #[serde(rename = "REDmodding")]
    RedModding,
    /// REDmod-aware load order.
    #[serde(rename = "REDmodLoadOrder")]
    RedModLoadOrder,
    /// Converting plain archive mods into REDmods on install.
    #[serde(rename = "REDmodAutoconvertArchives")]
    RedModAutoconvertArchives,
}

impl Feature {
    pub fn all() -> &'static [Feature] {
        &[
            Self::RedModding,
            Self::RedModLoadOrder,
            Self::RedModAutoconvertArchives,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedModding => "REDmodding",
            Self::RedModLoadOrder => "REDmodLoadOrder",
            Self::RedModAutoconvertArchives => "REDmodAutoconvertArchives",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::all()
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown feature: {}", s))
    }
}

/// Mapping of feature name to enabled flag. Missing entries are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    flags: BTreeMap<Feature, bool>,
}

impl FeatureSet {
    /// An empty set: every feature disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The feature defaults this build ships with.
    pub fn current() -> Self {
        Self::new()
            .with(Feature::RedModding, true)
            .with(Feature::RedModLoadOrder, false)
            .with(Feature::RedModAutoconvertArchives, false)
    }

    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.flags.insert(feature, enabled);
        self
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.flags.get(&feature).copied().unwrap_or(false)
    }
}
