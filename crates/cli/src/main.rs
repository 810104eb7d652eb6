//! # Deskline CLI
//!
//! Command-line interface for the Deskline help desk.
//!
//! ## Usage
//!
//! ```bash
//! deskline serve    # Start the API server (runs migrations automatically)
//! deskline migrate  # Run database migrations and seeds
//! deskline --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait;

mod config;
mod server;

use config::DatabaseConfig;

/// Deskline - help-desk ticketing service
#[derive(Parser, Debug)]
#[command(name = "deskline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "DESKLINE_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations and seed data
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "DESKLINE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port to bind to
    #[arg(short, long, env = "DESKLINE_PORT", default_value = "3000")]
    port: u16,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration instead of applying pending ones
    #[arg(long)]
    rollback: bool,

    /// Skip seeding demo data after migrating
    #[arg(long)]
    no_seed: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(command = ?cli.command, "Deskline CLI starting...");

    match cli.command {
        Commands::Serve(args) => serve(&args).await?,
        Commands::Migrate(args) => migrate(&args).await?,
        Commands::Completions(args) => completions(&args)?,
        Commands::Validate => validate()?,
    }

    Ok(())
}

async fn connect() -> Result<sea_orm::DbConn> {
    let db_config = DatabaseConfig::default();

    tracing::info!(
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        "Connecting to database..."
    );

    migration::connect_to_database(&db_config.url())
        .await
        .map_err(|e| error::AppError::database(format!("Failed to connect to database: {}", e)))
}

async fn serve(args: &ServeArgs) -> Result<()> {
    tracing::info!(host = %args.host, port = %args.port, "Starting API server...");

    let db = connect().await?;

    // Bring the schema up to date before accepting traffic
    tracing::info!("Running database migrations...");
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| error::AppError::migration(format!("Migration failed: {}", e)))?;

    migration::seeds::run_all_seeds(&db, true).await?;

    crate::server::run(&args.host, args.port, db).await
}

async fn migrate(args: &MigrateArgs) -> Result<()> {
    let db = connect().await?;

    if args.rollback {
        tracing::info!("Rolling back the last migration...");
        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| error::AppError::migration(format!("Rollback failed: {}", e)))?;

        tracing::info!("Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| error::AppError::migration(format!("Migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");

    if !args.no_seed {
        migration::seeds::run_all_seeds(&db, true).await?;
        tracing::info!("Seed data completed successfully");
    }

    Ok(())
}

fn completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "deskline",
        &mut std::io::stdout(),
    );
    Ok(())
}

fn validate() -> Result<()> {
    tracing::info!("Validating configuration...");

    let db_config = DatabaseConfig::default();
    if db_config.database.is_empty() || db_config.host.is_empty() {
        return Err(error::AppError::config("Database host and name must not be empty"));
    }

    let intel = config::intelligence_config();
    if !intel.base_url.starts_with("http://") && !intel.base_url.starts_with("https://") {
        return Err(error::AppError::config(format!(
            "DESKLINE_INTEL_URL must be an http(s) URL, got '{}'",
            intel.base_url
        )));
    }
    if intel.timeout_secs == 0 {
        return Err(error::AppError::config("DESKLINE_INTEL_TIMEOUT_SECS must be at least 1"));
    }

    tracing::info!(
        database = %db_config.database,
        intelligence = %intel.base_url,
        "Configuration is valid"
    );
    Ok(())
}
