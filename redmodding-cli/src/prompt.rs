//! Terminal acquisition prompt.

use async_trait::async_trait;
use dialoguer::Select;
use tracing::warn;

use redmodding_core::{InstallPrompter, PromptChoice, StorefrontInfo};

/// Asks on the terminal.
pub struct TerminalPrompter;

#[async_trait]
impl InstallPrompter for TerminalPrompter {
    async fn prompt_install(&self, storefront: &StorefrontInfo) -> PromptChoice {
        let storefront = storefront.clone();
        let answer = tokio::task::spawn_blocking(move || ask(&storefront)).await;
        match answer {
            Ok(Ok(choice)) => choice,
            Ok(Err(e)) => {
                warn!(error = %e, "Prompt failed, dismissing");
                PromptChoice::Dismiss
            }
            Err(e) => {
                warn!(error = %e, "Prompt task failed, dismissing");
                PromptChoice::Dismiss
            }
        }
    }
}

fn ask(storefront: &StorefrontInfo) -> dialoguer::Result<PromptChoice> {
    let title = match storefront.name {
        Some(name) => format!("REDmod is not installed. Get the free REDmod DLC from {}?", name),
        None => "REDmod is not installed. Open the modding support page?".to_string(),
    };

    let mut options = Vec::new();
    if let Some(name) = storefront.name {
        options.push((format!("Open {}", name), PromptChoice::OpenStore));
    }
    options.push((format!("Open {}", storefront.url), PromptChoice::OpenWebPage));
    options.push(("Not now".to_string(), PromptChoice::Dismiss));

    let labels: Vec<&str> = options.iter().map(|(label, _)| label.as_str()).collect();
    let picked = Select::new()
        .with_prompt(title)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[picked].1)
}

/// Never asks; always dismisses.
pub struct DismissPrompter;

#[async_trait]
impl InstallPrompter for DismissPrompter {
    async fn prompt_install(&self, storefront: &StorefrontInfo) -> PromptChoice {
        println!(
            "REDmod is not installed. Get it from: {}",
            storefront.url
        );
        PromptChoice::Dismiss
    }
}
