use anyhow::Result;
use clap::{Parser, Subcommand};
use olympiad::config::{AdminCredentials, DEFAULT_DATABASE, DEFAULT_PORT};
use olympiad::server::{self, MigrateDirection};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations and serve the admin API
    Serve {
        #[clap(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[clap(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
        #[clap(long)]
        cors_origin: Option<String>,
        /// Load the demo reference dataset before serving
        #[clap(long)]
        seed: bool,
    },
    /// Apply schema migrations
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// Load the demo reference dataset
    Seed {
        #[clap(short, long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match cli.command {
        Command::Serve {
            port,
            database,
            cors_origin,
            seed,
        } => {
            info!("Starting server on port {}", port);
            server::start_server(
                port,
                &database,
                cors_origin.as_deref(),
                seed,
                AdminCredentials::from_env(),
            )
            .await?;
        }
        Command::Migrate {
            direction,
            database,
        } => {
            server::migrate_database(&database, direction).await?;
        }
        Command::Seed { database } => {
            server::seed_database(&database).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
