//! URL opener backed by the system browser / URL handler.

use async_trait::async_trait;
use tracing::debug;

use super::UrlOpener;
use crate::error::OpenError;

/// Opens URLs with the platform handler, so store schemes such as
/// `steam://` reach the store client when it is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserOpener;

#[async_trait]
impl UrlOpener for BrowserOpener {
    async fn open(&self, url: &str) -> Result<(), OpenError> {
        debug!(url, "Opening URL");
        let target = url.to_string();
        tokio::task::spawn_blocking(move || webbrowser::open(&target))
            .await
            .map_err(|e| OpenError::new(url, e))?
            .map_err(|e| OpenError::new(url, e))
    }
}
