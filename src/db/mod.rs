//! Database module: entity models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: `User` / `Address` rows and their relationship
//! - `schema.rs`: embedded SQL migrations (SQLite-first)
//! - `migrate.rs`: applies pending migrations through `sqlx::migrate`
//! - `sqlite.rs`: the `Database` handle used by the rest of the crate

pub mod migrate;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use migrate::{AppliedMigration, applied_migrations, run_migrations};
pub use models::{Address, EMAIL_ADDRESS_MAX_LEN, USERNAME_MAX_LEN, User};
pub use schema::MIGRATOR;
pub use sqlite::{Database, SqlitePool};
