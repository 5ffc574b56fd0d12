//! SQL DDL for the `user` / `address` tables, shipped as ordered migrations.
//! SQLite-first design; can be adapted for other RDBMS.
//!
//! Files under `migrations/` are named `<version>_<description>.sql` and are
//! embedded at compile time. New migrations get the next version number.

use sqlx::migrate::Migrator;

pub static MIGRATOR: Migrator = sqlx::migrate!("src/db/migrations");
