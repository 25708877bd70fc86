mod config;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use ipscout_agent::{CyberAgent, DecisionMode, QueryRequest};
use ipscout_planner::classify_expectation;

use config::Config;

#[derive(Parser)]
#[command(name = "ipscout")]
#[command(about = "ipscout: route analyst IP queries to WHOIS, GeoIP and reputation lookups")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo queries (the default)
    Demo {
        /// Decision mode: explicit or inferred
        #[arg(short, long)]
        mode: Option<DecisionMode>,
    },
    /// Route a single query
    Ask {
        /// The analyst's question
        query: String,
        /// IP address to look up
        #[arg(long)]
        ip: String,
        /// Force this tool instead of asking the model
        #[arg(short, long)]
        force: Option<String>,
        /// Tool considered correct (with --force; defaults to the keyword policy)
        #[arg(short, long)]
        expect: Option<String>,
    },
    /// List the available lookup tools
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    ipscout_logging::init_logger(config.log_dir.as_deref(), &config.log_level)?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Demo { mode: None }) {
        Commands::Demo { mode } => {
            let mode = mode.unwrap_or(config.mode);
            info!(mode = %mode, "Running demo");
            let agent = CyberAgent::new(config.agent_config(mode));
            demo::run(&agent).await?;
        }
        Commands::Ask {
            query,
            ip,
            force,
            expect,
        } => {
            let (mode, request) = match force {
                Some(force) => {
                    let expected = expect
                        .unwrap_or_else(|| classify_expectation(&query).as_str().to_string());
                    (
                        DecisionMode::Explicit,
                        QueryRequest::explicit(query, ip, force, expected),
                    )
                }
                None => (DecisionMode::Inferred, QueryRequest::inferred(query, ip)),
            };
            let agent = CyberAgent::new(config.agent_config(mode));
            let record = agent.handle_query(&request).await;
            demo::print_record(&record)?;
        }
        Commands::Tools => {
            let agent = CyberAgent::new(config.agent_config(DecisionMode::Explicit));
            for tool in agent.registry().list() {
                println!("{:<18} {}", tool.id().as_str(), tool.description());
            }
        }
    }

    Ok(())
}
