//! Database Module
//!
//! Embedded SurrealDB storage: connection setup and schema definition.

pub mod models;
pub mod repository;

use crate::common::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "gallery";
const DATABASE: &str = "gallery";

/// Table and index definitions, applied idempotently at startup.
///
/// Tables are schemaless; the indexes back the hot derived-count queries
/// (ownership counts, daily quotas, pending dividends).
const SCHEMA: &[&str] = &[
    "DEFINE TABLE IF NOT EXISTS user SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS user_open_id ON user FIELDS open_id UNIQUE",
    "DEFINE TABLE IF NOT EXISTS series SCHEMALESS",
    "DEFINE TABLE IF NOT EXISTS copyright SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS copyright_series ON copyright FIELDS series",
    "DEFINE TABLE IF NOT EXISTS share SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS share_user ON share FIELDS user",
    "DEFINE INDEX IF NOT EXISTS share_copyright ON share FIELDS copyright",
    "DEFINE TABLE IF NOT EXISTS fragment SCHEMALESS",
    "DEFINE TABLE IF NOT EXISTS gallery_coin SCHEMALESS",
    "DEFINE TABLE IF NOT EXISTS user_buff SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS user_buff_user ON user_buff FIELDS user",
    "DEFINE TABLE IF NOT EXISTS box SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS box_user_type ON box FIELDS user, box_type",
    "DEFINE TABLE IF NOT EXISTS dividend SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS dividend_status ON dividend FIELDS status",
    "DEFINE TABLE IF NOT EXISTS appreciation SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS appreciation_user ON appreciation FIELDS user",
];

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;
        tracing::info!(path = %db_path, "Database connection established (embedded SurrealDB)");

        Ok(Self { db })
    }

    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        for stmt in SCHEMA {
            db.query(*stmt)
                .await
                .map_err(|e| AppError::Database(format!("Schema definition failed: {e}")))?
                .check()
                .map_err(|e| AppError::Database(format!("Schema definition failed: {e}")))?;
        }
        Ok(())
    }
}
