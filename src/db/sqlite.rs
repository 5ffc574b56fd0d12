use crate::db::migrate::run_migrations;
use crate::db::models::{Address, User};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

/// Persistence context for users and their addresses.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `database_url`, enforce
    /// foreign keys on every connection and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

        let db = Self::new(pool);
        let applied = run_migrations(db.pool()).await?;
        info!(database_url, applied, "database ready");
        Ok(db)
    }

    /// Wrap an existing pool. Does not run migrations.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn create_user(&self, username: Option<&str>) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO "user" (username) VALUES (?) RETURNING id, username"#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = user.id, "user created");
        Ok(user)
    }

    /// Fetch a user with its addresses loaded.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT id, username FROM "user" WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match user {
            Some(mut user) => {
                user.addresses = self.addresses_of(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// All users ordered by id, each with its addresses loaded.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut users = sqlx::query_as::<_, User>(r#"SELECT id, username FROM "user" ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        for user in users.iter_mut() {
            user.addresses = self.addresses_of(user.id).await?;
        }
        Ok(users)
    }

    /// Insert an address. A `user_id` that names no existing user is
    /// rejected by SQLite with a foreign-key violation.
    pub async fn create_address(
        &self,
        email_address: Option<&str>,
        user_id: Option<i64>,
    ) -> Result<Address, AppError> {
        let address = sqlx::query_as::<_, Address>(
            r#"INSERT INTO address (email_address, user_id) VALUES (?, ?)
               RETURNING id, email_address, user_id"#,
        )
        .bind(email_address)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = address.id, user_id = ?address.user_id, "address created");
        Ok(address)
    }

    pub async fn get_address(&self, id: i64) -> Result<Option<Address>, AppError> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, email_address, user_id FROM address WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(address)
    }

    /// Addresses owned by `user_id`, ordered by id.
    pub async fn addresses_of(&self, user_id: i64) -> Result<Vec<Address>, AppError> {
        let rows = sqlx::query_as::<_, Address>(
            "SELECT id, email_address, user_id FROM address WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// The user an address belongs to, if any. Addresses are not loaded.
    pub async fn owner_of(&self, address: &Address) -> Result<Option<User>, AppError> {
        let Some(user_id) = address.user_id else {
            return Ok(None);
        };
        let user = sqlx::query_as::<_, User>(r#"SELECT id, username FROM "user" WHERE id = ?"#)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Delete a user. Fails with a foreign-key violation while any address
    /// still references it. Returns whether a row was removed.
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_address(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM address WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
