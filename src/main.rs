use anyhow::Result;
use clap::{Parser, Subcommand};

/// acordi-relay - contact form relay for the Acordi website
#[derive(Parser)]
#[command(name = "acordi-relay")]
#[command(about = "Relays contact form submissions to the email provider", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = acordi_relay::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    acordi_relay::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => {
            tracing::info!("Starting acordi-relay server...");
            acordi_relay::server::serve(config, host, port).await
        }
    }
}
