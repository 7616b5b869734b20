use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// The main entry point for the Campus application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from the .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let config = configuration::load_config()?;
            web_server::run_server(config).await?;
        }
        Commands::Migrate => {
            let pool = database::connect().await?;
            database::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied.");
        }
    }

    Ok(())
}

/// A REST service for managing schools and classrooms, with full-text search.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve,
    /// Apply the database migrations and exit.
    Migrate,
}
