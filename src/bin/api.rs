//! Citazioni API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use citazioni::api::{self, ApiError, Config};
use citazioni::db::{Database, DbError, SqliteDatabase};
use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(citazioni::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(citazioni::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(citazioni::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "citazioni-api")]
#[command(author, version, about = "Citazioni quote API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Database file path
    #[arg(long, env = "DATABASE_PATH", default_value = "citazioni.db")]
    db: PathBuf,

    /// Seconds a single store call may take before the request fails
    #[arg(long, env = "STORE_TIMEOUT_SECS", default_value = "5")]
    store_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    // .env is optional; real environment variables take precedence
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    api::init_tracing();

    info!("Opening database at {:?}", cli.db);

    // Ensure parent directory exists
    if let Some(parent) = cli.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&cli.db).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    info!("Database migrations complete");

    // Pass the abstract Database to the API layer
    api::run(
        Config {
            host: cli.host,
            port: cli.port,
            store_timeout: Duration::from_secs(cli.store_timeout_secs),
        },
        db,
    )
    .await?;

    Ok(())
}
