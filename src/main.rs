use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// jointravel - reactions on travel reviews
#[derive(Parser)]
#[command(name = "jointravel")]
#[command(about = "Like and dislike reactions for JoinTravel reviews", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the reaction store HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// React to a review on a running server
    Reaction {
        #[command(subcommand)]
        action: cli::reaction::Action,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = jointravel::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    jointravel::observability::init_observability(
        "jointravel",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
        Commands::Reaction { action } => cli::reaction::run(&config, action).await,
    }
}
