//! Document persistence for the portfolio backend.
//!
//! [`DocumentStore`] is the generic contract; [`PgDocumentStore`] and
//! [`MemoryDocumentStore`] implement it. Typed models and repositories in
//! [`models`] and [`repositories`] sit on top of the generic store.

use sqlx::postgres::PgPoolOptions;

pub mod fields;
pub mod lenient;
pub mod memory;
pub mod models;
pub mod pg;
pub mod repositories;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use pg::PgDocumentStore;
pub use store::{decode_all, to_fields, Document, DocumentStore, Fields, Filter, FilterOp, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool is usable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
