//! Open Library dump loader - one-shot import of author and work dumps.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openlib_loader::{
    config::{AppConfig, LoggingConfig},
    models::LoadSummary,
    repository::{
        memory::{MemoryAuthorStore, MemoryBookStore},
        Repository,
    },
    services::InitialLoad,
    AppError, AppResult,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    run().await?;
    Ok(())
}

async fn run() -> AppResult<()> {
    let config = AppConfig::load()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting Open Library loader v{}", env!("CARGO_PKG_VERSION"));

    let result = if config.loader.dry_run {
        load_in_memory(&config).await
    } else {
        load_into_postgres(&config).await
    };

    match result {
        Ok(summary) => {
            tracing::info!("Initial load completed: {}", summary_json(&summary));
            Ok(())
        }
        Err(AppError::Incomplete { summary, source }) => {
            tracing::error!("Initial load incomplete: {}", summary_json(&summary));
            Err(AppError::Incomplete { summary, source })
        }
        Err(e) => Err(e),
    }
}

fn init_tracing(logging: &LoggingConfig) -> AppResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("openlib_loader={},sqlx=warn", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| AppError::Internal(format!("Failed to initialise logging: {}", e)))
}

async fn load_into_postgres(config: &AppConfig) -> AppResult<LoadSummary> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    let repository = Repository::new(pool);
    let summary = InitialLoad::new(
        repository.author_store(),
        repository.book_store(),
        config.datadump.clone(),
        &config.loader,
    )
    .run()
    .await?;

    tracing::info!(
        authors = repository.authors.count().await?,
        books = repository.books.count().await?,
        "Database totals"
    );

    Ok(summary)
}

async fn load_in_memory(config: &AppConfig) -> AppResult<LoadSummary> {
    tracing::info!("Dry run: loading into memory, database untouched");

    let authors = MemoryAuthorStore::new();
    let books = MemoryBookStore::new();
    let summary = InitialLoad::new(
        Arc::new(authors.clone()),
        Arc::new(books.clone()),
        config.datadump.clone(),
        &config.loader,
    )
    .run()
    .await?;

    tracing::info!(
        authors = authors.len().await,
        books = books.len().await,
        "Dry run totals"
    );

    Ok(summary)
}

fn summary_json(summary: &LoadSummary) -> String {
    serde_json::to_string(summary).unwrap_or_else(|_| format!("{:?}", summary))
}
