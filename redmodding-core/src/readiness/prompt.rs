//! Offers the REDmod DLC to the user.

use serde_json::json;

use crate::host::{HostContext, LogLevel, PromptChoice};
use crate::storefront::StorefrontInfo;

/// Shows the acquisition dialog and carries out the user's choice.
///
/// A failed open is logged; the dialog has done its job either way.
pub async fn prompt_redmod_install(ctx: &HostContext, storefront: &StorefrontInfo) -> PromptChoice {
    let choice = ctx.prompter.prompt_install(storefront).await;

    let opened = match choice {
        PromptChoice::OpenStore => storefront.open(ctx.opener.as_ref()).await,
        PromptChoice::OpenWebPage => storefront.open_web_page(ctx.opener.as_ref()).await,
        PromptChoice::Dismiss => {
            ctx.log(LogLevel::Debug, "REDmod install prompt dismissed");
            return choice;
        }
    };

    if let Err(e) = opened {
        ctx.log_with(
            LogLevel::Warn,
            "Unable to open the REDmod store page",
            json!({ "url": storefront.url, "error": e.to_string() }),
        );
    }
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::resolve_storefront;
    use crate::testing::{RecordingOpener, TestHost};

    #[tokio::test]
    async fn test_open_store_runs_deep_link() {
        let host = TestHost::new().answering(PromptChoice::OpenStore);
        let epic = resolve_storefront(Some("epic"));

        let choice = prompt_redmod_install(&host.ctx(), &epic).await;

        assert_eq!(choice, PromptChoice::OpenStore);
        assert_eq!(host.prompted(), vec![epic.clone()]);
        assert_eq!(
            host.opener.opened(),
            vec!["com.epicgames.launcher://store/p/cyberpunk-2077".to_string()]
        );
    }

    #[tokio::test]
    async fn test_open_web_page_skips_deep_link() {
        let host = TestHost::new().answering(PromptChoice::OpenWebPage);
        let steam = resolve_storefront(Some("steam"));

        prompt_redmod_install(&host.ctx(), &steam).await;

        assert_eq!(host.opener.opened(), vec![steam.url.to_string()]);
    }

    #[tokio::test]
    async fn test_dismiss_opens_nothing() {
        let host = TestHost::new().answering(PromptChoice::Dismiss);
        prompt_redmod_install(&host.ctx(), &resolve_storefront(None)).await;
        assert!(host.opener.opened().is_empty());
    }

    #[tokio::test]
    async fn test_open_failure_is_logged_not_raised() {
        let host = TestHost::new()
            .answering(PromptChoice::OpenWebPage)
            .with_opener(RecordingOpener::failing_on("https://"));

        let choice = prompt_redmod_install(&host.ctx(), &resolve_storefront(None)).await;

        assert_eq!(choice, PromptChoice::OpenWebPage);
        assert!(host
            .logs()
            .iter()
            .any(|(level, msg)| *level == LogLevel::Warn && msg.contains("store page")));
    }
}
