//! # Campus Database Crate
//!
//! This crate is the entity store: the authoritative PostgreSQL persistence
//! layer for `School` and `Classroom` records. The search index is only a
//! derived projection of what lives here.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations, ensuring the schema is up-to-date.
//! - `SchoolStore` / `ClassroomStore`: The per-entity store contracts
//!   (create, upsert-by-id, eager find, idempotent delete).
//! - `DbRepository`: The Postgres implementation of both store contracts,
//!   holding the shared connection pool.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
pub use store::{ClassroomStore, SchoolStore};
