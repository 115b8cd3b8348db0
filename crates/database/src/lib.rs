//! # Newswire Database Crate
//!
//! This crate is the application's only doorway to PostgreSQL. It
//! encapsulates the connection pool, the embedded schema migrations, every
//! parameterized query the API issues, and the translation of database
//! failures into the domain-level `DbError` taxonomy.
//!
//! ## Public API
//!
//! - `connect`: establishes the shared `PgPool` from `DATABASE_URL`.
//! - `run_migrations`: applies the embedded schema migrations.
//! - `NewsRepository`: owns the pool and provides the data-access
//!   operations (`list_topics`, `article_by_id`, `insert_comment`, ...).
//! - `DbError`: the typed failures those operations raise.

pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::NewsRepository;
