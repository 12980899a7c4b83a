//! Contact storage.
//!
//! Every operation checks one connection out of the pool for its whole unit
//! of work. The connection goes back to the pool when the operation returns,
//! whether it succeeded or failed.

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::FromRow;

pub use postgres::PgContactStore;
pub use sqlite::SqliteContactStore;

/// Shared handle to the configured backend.
pub type Store = Arc<dyn ContactStore>;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unsupported database url scheme '{0}'")]
    UnsupportedUrl(String),
}

impl StoreError {
    /// True when the pool could not hand out a connection.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Sqlx(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed)
        )
    }
}

/// Row of the `contacts` table. Columns are nullable at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Column values for an insert or a full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Offset/limit window for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// SQL OFFSET, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// SQL LIMIT, saturating at `i64::MAX`.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Single-row operations on the `contacts` table.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Create the `contacts` table if it does not exist.
    async fn create_schema(&self) -> Result<(), StoreError>;

    /// Round trip to the database.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert a row and return it with its generated id.
    async fn create(&self, contact: &NewContact) -> Result<ContactRow, StoreError>;

    /// Rows in id order within the window.
    async fn list(&self, page: Page) -> Result<Vec<ContactRow>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<ContactRow>, StoreError>;

    /// Overwrite all three fields. `None` when no row has this id.
    async fn update(&self, id: i64, contact: &NewContact)
        -> Result<Option<ContactRow>, StoreError>;

    /// Remove the row. `false` when no row has this id.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Drain and close the pool.
    async fn close(&self);
}

/// Open a store for `database_url`, picking the backend from the URL scheme.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Store, StoreError> {
    let scheme = database_url
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .unwrap_or_default();

    match scheme {
        "postgres" | "postgresql" => {
            let store = PgContactStore::connect(database_url, max_connections).await?;
            tracing::info!(backend = "postgres", max_connections, "database pool ready");
            Ok(Arc::new(store))
        }
        "sqlite" => {
            let store = SqliteContactStore::connect(database_url, max_connections).await?;
            tracing::info!(backend = "sqlite", "database pool ready");
            Ok(Arc::new(store))
        }
        other => Err(StoreError::UnsupportedUrl(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults() {
        let page = Page::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn page_saturates() {
        let page = Page::new(u64::MAX, u64::MAX);
        assert_eq!(page.offset(), i64::MAX);
        assert_eq!(page.limit(), i64::MAX);
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let err = connect("mysql://root@localhost/agenda", 1)
            .await
            .err()
            .expect("mysql is not supported");
        assert!(matches!(err, StoreError::UnsupportedUrl(ref s) if s == "mysql"));
    }

    #[test]
    fn pool_exhaustion_is_unavailable() {
        assert!(StoreError::Sqlx(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(!StoreError::Sqlx(sqlx::Error::RowNotFound).is_unavailable());
    }
}
