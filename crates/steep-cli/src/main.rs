//! CLI binary for inspecting and promoting Steep stages.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use steep_pipeline::{Config, Pipeline, PromoteOptions};
use steep_store::{names, FileSystemStorage, Storage};
use steep_types::SteepError;

#[derive(Parser)]
#[command(name = "steep", version, about = "Staged suite-fixture store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON config file (defaults to the built-in configuration)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the effective configuration
    Config,

    /// Update a stage with data from the preceding stage
    Update {
        /// Suite name patterns to promote (all suites when omitted)
        suites: Vec<String>,

        /// Stage to update (defaults to the last configured stage)
        #[arg(short, long)]
        stage: Option<String>,

        /// Restrict promotion to scope instances matching this pattern
        #[arg(long)]
        scope: Option<String>,
    },

    /// List the suites stored in a stage
    List {
        /// Stage name
        stage: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Update {
            suites,
            stage,
            scope,
        } => {
            cmd_update(config, suites, stage, scope).await?;
        }
        Commands::List { stage } => {
            cmd_list(config, &stage).await?;
        }
    }

    Ok(())
}

async fn cmd_update(
    config: Config,
    suites: Vec<String>,
    stage: Option<String>,
    scope: Option<String>,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let stage = match stage {
        Some(name) => name,
        None => pipeline
            .config()
            .stages
            .last()
            .map(|s| s.name.clone())
            .ok_or_else(|| anyhow::anyhow!("no stages configured"))?,
    };
    let options = PromoteOptions { scope };

    if suites.is_empty() {
        pipeline.promote(&stage, None, &options).await?;
        println!("Updated stage {stage:?}");
        return Ok(());
    }

    for suite in &suites {
        pipeline.promote(&stage, Some(suite), &options).await?;
        println!("Updated stage {stage:?} with {suite:?}");
    }
    Ok(())
}

async fn cmd_list(config: Config, stage: &str) -> anyhow::Result<()> {
    let stage_config = config
        .stages
        .iter()
        .find(|s| s.name == stage)
        .ok_or_else(|| SteepError::UnknownStage(stage.to_string()))?;

    let storage = FileSystemStorage::create(&stage_config.root).await?;
    let data = storage.export().await?;
    for name in names(&data) {
        println!("{name}");
    }
    Ok(())
}
