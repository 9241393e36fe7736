//! Where to get REDmod, per storefront.
//!
//! REDmod is a free DLC. Steam, GOG and Epic each have their own page and
//! their own client deep link; every other store falls back to CD PROJEKT
//! RED's modding support page.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::OpenError;
use crate::host::UrlOpener;

/// Help page used when the store is unknown.
pub const GENERIC_HELP_URL: &str = "https://www.cyberpunk.net/en/modding-support";

// ============================================================================
// Storefronts
// ============================================================================

/// Stores that sell the REDmod DLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storefront {
    Steam,
    Gog,
    Epic,
}

impl Storefront {
    pub fn all() -> &'static [Storefront] {
        &[Self::Steam, Self::Gog, Self::Epic]
    }

    /// Host store id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Gog => "gog",
            Self::Epic => "epic",
        }
    }

    /// Maps a host store id. Unknown and missing ids yield `None`.
    pub fn from_store_id(id: Option<&str>) -> Option<Self> {
        match id? {
            "steam" => Some(Self::Steam),
            "gog" => Some(Self::Gog),
            "epic" => Some(Self::Epic),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Steam => "Steam",
            Self::Gog => "GOG",
            Self::Epic => "Epic Games Store",
        }
    }

    /// Web page of the REDmod DLC.
    pub fn store_url(&self) -> &'static str {
        match self {
            Self::Steam => "https://store.steampowered.com/app/2060310/Cyberpunk_2077_REDmod/",
            Self::Gog => "https://www.gog.com/en/game/cyberpunk_2077_redmod",
            Self::Epic => "https://store.epicgames.com/en-US/p/cyberpunk-2077",
        }
    }

    /// Link that opens the store client directly.
    pub fn deep_link(&self) -> &'static str {
        match self {
            Self::Steam => "steam://run/2060310",
            Self::Gog => "goggalaxy://openStoreUrl/embed.gog.com/game/cyberpunk_2077_redmod",
            Self::Epic => "com.epicgames.launcher://store/p/cyberpunk-2077",
        }
    }
}

impl fmt::Display for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Storefront {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_store_id(Some(s.to_lowercase().as_str()))
            .ok_or_else(|| format!("Unknown storefront: {}", s))
    }
}

// ============================================================================
// Storefront Info
// ============================================================================

/// What the acquisition dialog shows and where "open" goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontInfo {
    /// `None` for the generic fallback.
    pub storefront: Option<Storefront>,
    /// Store display name. `None` for the generic fallback.
    pub name: Option<&'static str>,
    /// Plain web URL.
    pub url: &'static str,
    /// Store-client link tried before `url`.
    pub deep_link: Option<&'static str>,
}

impl StorefrontInfo {
    pub fn generic() -> Self {
        Self {
            storefront: None,
            name: None,
            url: GENERIC_HELP_URL,
            deep_link: None,
        }
    }

    /// Opens the store page: the client deep link first, then the web URL.
    pub async fn open(&self, opener: &dyn UrlOpener) -> Result<(), OpenError> {
        if let Some(link) = self.deep_link {
            match opener.open(link).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!(link, error = %e, "Store deep link failed, falling back to web page"),
            }
        }
        self.open_web_page(opener).await
    }

    /// Opens the plain web URL.
    pub async fn open_web_page(&self, opener: &dyn UrlOpener) -> Result<(), OpenError> {
        opener.open(self.url).await
    }
}

impl From<Storefront> for StorefrontInfo {
    fn from(store: Storefront) -> Self {
        Self {
            storefront: Some(store),
            name: Some(store.display_name()),
            url: store.store_url(),
            deep_link: Some(store.deep_link()),
        }
    }
}

/// Resolves a host store id to its REDmod acquisition info. Never fails.
pub fn resolve_storefront(store_id: Option<&str>) -> StorefrontInfo {
    Storefront::from_store_id(store_id)
        .map(StorefrontInfo::from)
        .unwrap_or_else(StorefrontInfo::generic)
}
