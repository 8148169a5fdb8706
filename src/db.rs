use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Invalid object id: {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] mongodb::bson::de::Error),

    #[error("Insert returned no object id")]
    MissingInsertedId,
}

/// Connect to MongoDB and ping it so an unreachable server fails at
/// startup rather than on the first request.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&config.uri).await?;
    let db = client.database(&config.name);

    db.run_command(doc! { "ping": 1 }).await?;

    tracing::info!("Connected to database: {}", config.name);
    Ok(db)
}
