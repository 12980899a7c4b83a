//! PostgreSQL backend.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use super::{ContactRow, ContactStore, NewContact, Page, StoreError};
use crate::schema;

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn session(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        Ok(self.pool.acquire().await?)
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn create_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.session().await?;
        sqlx::query(schema::POSTGRES_CONTACTS)
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
            VALUES ($1, $2, $3)
            RETURNING id::int8 AS id, name, phone, email
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
            SELECT id::int8 AS id, name, phone, email
            FROM contacts
            ORDER BY id
            LIMIT $1 OFFSET $2
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
            "SELECT id::int8 AS id, name, phone, email FROM contacts WHERE id = $1",
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
            SET name = $1, phone = $2, email = $3
            WHERE id = $4
            RETURNING id::int8 AS id, name, phone, email
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
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
