use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

mod config;
mod constants;
mod error;
mod generator;
mod logging;
mod orchestrator;
mod pipeline;
mod prompts;
mod server;
mod types;

use crate::config::Config;
use crate::generator::OpenAiGenerator;
use crate::orchestrator::{Mode, Orchestrator};
use crate::pipeline::link_check::HttpProber;
use crate::types::FindRequest;

#[derive(Parser)]
#[command(name = "event_finder")]
#[command(about = "LLM-assisted business and community event discovery for BBB New England")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Business,
    Public,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Business => Mode::Business,
            ModeArg::Public => Mode::Public,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
    /// Run one discovery pass and print the region map as JSON
    Discover {
        /// Which event mode to discover
        #[arg(long, value_enum, default_value = "business")]
        mode: ModeArg,
        /// Window size in days (mode default when omitted)
        #[arg(long)]
        days: Option<i64>,
        /// Target event count per state (mode default when omitted)
        #[arg(long)]
        target: Option<usize>,
        /// Keep events whose date could not be parsed
        #[arg(long)]
        allow_unknown_dates: Option<bool>,
    },
}

fn build_orchestrator(config: Config) -> error::Result<Orchestrator> {
    let generator = Arc::new(OpenAiGenerator::new(config.generator.clone())?);
    let prober = Arc::new(HttpProber::new(Duration::from_secs(
        config.pipeline.probe_timeout_seconds,
    ))?);
    Ok(Orchestrator::new(generator, prober, config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            let orchestrator = Arc::new(build_orchestrator(config)?);
            server::start_server(orchestrator, port).await?;
        }
        Commands::Discover {
            mode,
            days,
            target,
            allow_unknown_dates,
        } => {
            let orchestrator = build_orchestrator(config)?;
            let request = FindRequest {
                days,
                allow_unknown_dates,
                target_per_state: target,
            };
            info!(?days, ?target, "running one-shot discovery");
            let results = orchestrator.find_events(mode.into(), &request).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}
