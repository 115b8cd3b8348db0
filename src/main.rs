use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// The main entry point for the Newswire API application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small REST API exposing a news dataset backed by PostgreSQL.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the listen port from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

/// Resolves the listen address and hands off to the web server.
async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut settings = configuration::load_settings()?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    let addr = settings.server.addr()?;

    tracing::info!("Starting API server on {}", addr);
    web_server::run_server(addr).await
}
