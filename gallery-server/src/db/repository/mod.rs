//! Repository Module
//!
//! Per-collection query modules over the embedded SurrealDB store. Cross-
//! document invariants (balances, capacities, status flips) are guarded with
//! conditional updates: `UPDATE … SET … WHERE guard RETURN AFTER` returns an
//! empty result when the guard fails, which callers treat as a lost race.

// Identity & wallet
pub mod gallery_coin;
pub mod user;

// Catalog
pub mod copyright;
pub mod series;

// Ownership
pub mod fragment;
pub mod share;

// Economy events
pub mod appreciation;
pub mod box_record;
pub mod dividend;
pub mod user_buff;

// Re-exports
pub use appreciation::AppreciationRepository;
pub use box_record::BoxRecordRepository;
pub use copyright::CopyrightRepository;
pub use dividend::DividendRepository;
pub use fragment::FragmentRepository;
pub use gallery_coin::GalleryCoinRepository;
pub use series::SeriesRepository;
pub use share::{HolderCount, PopularCopyright, ShareRepository};
pub use user::UserRepository;
pub use user_buff::UserBuffRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
