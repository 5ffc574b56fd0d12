use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

/// Declared width of `user.username`.
pub const USERNAME_MAX_LEN: usize = 20;
/// Declared width of `address.email_address`.
pub const EMAIL_ADDRESS_MAX_LEN: usize = 50;

/// Row of the `user` table together with the addresses that point at it.
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    /// Filled by the storage layer from `address.user_id`; never a column.
    #[sqlx(skip)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Address {
    pub id: i64,
    pub email_address: Option<String>,
    pub user_id: Option<i64>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User: {}>", self.username.as_deref().unwrap_or("None"))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Email: {}>",
            self.email_address.as_deref().unwrap_or("None")
        )
    }
}
