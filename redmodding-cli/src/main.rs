//! REDmodding CLI
//!
//! Drives the REDmod readiness checks against a local Cyberpunk 2077 install.

mod host;
mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use redmodding_core::config::state_file_path;
use redmodding_core::{
    check_state, setup_hook, AutoDeploy, Discovery, FeatureSet, HostContext, InstallPrompter,
    ReadinessStatus, RegisteredAction, SettingsAction, Storefront, TracingLog,
};

use host::{LocalState, LocalStores};
use prompt::{DismissPrompter, TerminalPrompter};

#[derive(Debug, Parser)]
#[command(name = "redmodding", version, about = "REDmod readiness for Cyberpunk 2077")]
struct Cli {
    /// Cyberpunk 2077 install directory.
    #[arg(long, global = true, default_value = ".")]
    game_dir: PathBuf,

    /// Settings file (defaults to the user config directory).
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the game setup hook: prepare directories and check for REDmod.
    Setup {
        /// Store the game was bought on.
        #[arg(long)]
        store: Option<Storefront>,

        /// Do not ask; just print where to get REDmod.
        #[arg(long)]
        no_prompt: bool,
    },
    /// Run the auto-deploy health check.
    Check,
    /// Show whether auto-deploy is available.
    Condition {
        /// Mark the profile for a deploy run when available.
        #[arg(long)]
        run: bool,
    },
    /// Show or change REDmod settings.
    Settings {
        #[arg(long)]
        red_mod_enable: Option<bool>,
        #[arg(long)]
        auto_run: Option<bool>,
        #[arg(long)]
        archive_auto_convert: Option<bool>,
    },
    /// List the REDmodding tools.
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("Starting REDmodding v{}", redmodding_core::VERSION);

    let state_path = match &cli.state {
        Some(path) => path.clone(),
        None => state_file_path().context("Failed to resolve settings location")?,
    };
    let state = Arc::new(LocalState::load(&cli.game_dir, &state_path)?);

    match cli.command {
        Command::Setup { store, no_prompt } => {
            let prompter: Arc<dyn InstallPrompter> = if no_prompt {
                Arc::new(DismissPrompter)
            } else {
                Arc::new(TerminalPrompter)
            };
            let ctx = HostContext::new(
                state,
                Arc::new(LocalStores::new(&cli.game_dir, store)),
                prompter,
            );

            let report = setup_hook(&ctx, &Discovery::new(&cli.game_dir)).await?;
            for outcome in &report.directories {
                match &outcome.result {
                    Ok(()) => println!("ok      {}", outcome.path.display()),
                    Err(e) => println!("failed  {} ({})", outcome.path.display(), e),
                }
            }
            match report.status {
                ReadinessStatus::ToolPresent => println!("REDmod is installed."),
                ReadinessStatus::AcquisitionOffered { storefront, choice } => println!(
                    "REDmod is missing. Offered {} ({:?}).",
                    storefront.name.unwrap_or("the modding support page"),
                    choice
                ),
            }
        }
        Command::Check => {
            let ctx = local_context(state, &cli.game_dir);
            let action = registered_auto_deploy(ctx.clone());
            println!("state: {:?}", check_state(&ctx, &FeatureSet::current()).await);
            match action.check().await {
                Some(diagnostic) => println!("{}", serde_json::to_string_pretty(&diagnostic)?),
                None => println!("No problems found."),
            }
        }
        Command::Condition { run } => {
            let action = registered_auto_deploy(local_context(state, &cli.game_dir));
            let eligible = action.condition(&[]);
            println!("auto-deploy available: {}", eligible);
            if run && eligible {
                action.action(&[]);
                println!("Profile marked for REDmod deploy.");
            }
        }
        Command::Settings {
            red_mod_enable,
            auto_run,
            archive_auto_convert,
        } => {
            use redmodding_core::HostState;

            let actions = [
                red_mod_enable.map(SettingsAction::SetRedModEnable),
                auto_run.map(SettingsAction::SetAutoRun),
                archive_auto_convert.map(SettingsAction::SetArchiveAutoConvert),
            ];
            for action in actions.into_iter().flatten() {
                state.dispatch(action);
            }
            println!("{}", serde_json::to_string_pretty(&state.document())?);
        }
        Command::Tools => {
            for tool in redmodding_core::redmodding_tools() {
                println!("{:<28} {:<16} {}", tool.id, tool.name, tool.executable);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn local_context(state: Arc<LocalState>, game_dir: &std::path::Path) -> HostContext {
    HostContext::new(
        state,
        Arc::new(LocalStores::new(game_dir, None)),
        Arc::new(DismissPrompter),
    )
}

fn registered_auto_deploy(ctx: HostContext) -> RegisteredAction {
    RegisteredAction::new(ctx, Arc::new(TracingLog), Arc::new(AutoDeploy))
}
