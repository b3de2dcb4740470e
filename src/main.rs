use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use movie_rental::{config, server};

#[derive(Parser)]
#[command(name = "movie-rental", version, about = "Movie catalog and rental platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the identity component: registration, login and client management
    Identity,
    /// Run the catalog component: movies and the rental lifecycle
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    match cli.command {
        Command::Identity => server::run_identity(config).await,
        Command::Catalog => server::run_catalog(config).await,
    }
}

fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
