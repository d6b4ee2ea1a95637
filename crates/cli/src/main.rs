//! Advisor CLI — the main entry point.
//!
//! Commands:
//! - `consult` — Run a single request through the workflow graph
//! - `serve`   — Start the HTTP gateway
//! - `config`  — Print the effective configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "advisor",
    about = "Advisor — supervisor-routed AI consulting workflow",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single request through the workflow
    Consult {
        /// The request to route
        #[arg(short, long)]
        message: String,

        /// Offering hints (repeatable)
        #[arg(short, long = "offering")]
        offerings: Vec<String>,

        /// Print the full final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing: RUST_LOG wins, then --verbose, then the
    // configured log level.
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        advisor_config::AppConfig::load()
            .map(|c| c.log_level)
            .unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Consult {
            message,
            offerings,
            json,
        } => commands::consult::run(message, offerings, json).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Config => commands::config_cmd::run()?,
    }

    Ok(())
}
