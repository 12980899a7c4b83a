//! SQLite backend, for single-file deployments and in-memory databases.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

use super::{ContactRow, ContactStore, NewContact, Page, StoreError};
use crate::schema;

pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Open (creating if missing) the database at `database_url`.
    ///
    /// An in-memory database lives only as long as its connection, so the
    /// pool is pinned to one connection that never expires.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn session(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        Ok(self.pool.acquire().await?)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn create_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.session().await?;
        sqlx::query(schema::SQLITE_CONTACTS)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.session().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    async fn create(&self, contact: &NewContact) -> Result<ContactRow, StoreError> {
        let mut conn = self.session().await?;
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (name, phone, email)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, phone, email
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.email)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    async fn list(&self, page: Page) -> Result<Vec<ContactRow>, StoreError> {
        let mut conn = self.session().await?;
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, phone, email
            FROM contacts
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<ContactRow>, StoreError> {
        let mut conn = self.session().await?;
        let row = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, phone, email FROM contacts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        contact: &NewContact,
    ) -> Result<Option<ContactRow>, StoreError> {
        let mut conn = self.session().await?;
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            UPDATE contacts
            SET name = ?1, phone = ?2, email = ?3
            WHERE id = ?4
            RETURNING id, name, phone, email
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.session().await?;
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteContactStore {
        let store = SqliteContactStore::connect("sqlite::memory:", 4)
            .await
            .expect("in-memory database");
        store.create_schema().await.expect("schema creation failed");
        store
    }

    fn contact(name: &str) -> NewContact {
        NewContact {
            name: name.into(),
            phone: "123".into(),
            email: format!("{}@x.com", name.to_lowercase()),
        }
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:agenda?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://agenda.db"));
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = store().await;
        let first = store.create(&contact("Ana")).await.unwrap();
        let second = store.create(&contact("Bia")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = store().await;
        let first = store.create(&contact("Ana")).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        let second = store.create(&contact("Bia")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let store = store().await;
        assert_eq!(store.update(42, &contact("Ana")).await.unwrap(), None);
        assert!(store.list(Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicates_are_allowed() {
        let store = store().await;
        store.create(&contact("Ana")).await.unwrap();
        store.create(&contact("Ana")).await.unwrap();
        assert_eq!(store.list(Page::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let store = store().await;
        store.create(&contact("Ana")).await.unwrap();
        store.create_schema().await.unwrap();
        assert_eq!(store.list(Page::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ping_after_close_fails() {
        let store = store().await;
        store.ping().await.unwrap();
        store.close().await;
        assert!(store.ping().await.is_err());
    }
}
