use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderDraft, OrderStatus};
use sqlx::{PgPool, Row};

use crate::error::StoreError;
use crate::{Result, store::OrderStore};

/// PostgreSQL-backed order store.
///
/// Orders live in a single `orders` table as one JSONB document per row,
/// with the status duplicated into its own column so the conditional
/// update can be a single `UPDATE ... WHERE status = $expected`.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self, draft))]
    async fn create(&self, draft: OrderDraft) -> Result<OrderId> {
        let id = OrderId::new();
        let order = draft.into_order(id);
        let doc = serde_json::to_value(&order)?;

        sqlx::query("INSERT INTO orders (id, status, doc) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(order.status.as_str())
            .bind(&doc)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return StoreError::DuplicateId(id);
                }
                StoreError::Database(e)
            })?;

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query("SELECT doc FROM orders WHERE id = $1")
            .bind(order_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc")?;
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, order))]
    async fn update_status(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        order: &Order,
    ) -> Result<()> {
        let doc = serde_json::to_value(order)?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $3, doc = $4, updated_at = NOW()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(expected.as_str())
        .bind(order.status.as_str())
        .bind(&doc)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Zero rows: either the order is missing or the status moved on.
        let actual: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
            .bind(order_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match actual {
            Some(actual) => Err(StoreError::StatusConflict {
                order_id,
                expected,
                actual: actual
                    .parse()
                    .map_err(|e: String| StoreError::Database(sqlx::Error::Decode(e.into())))?,
            }),
            None => Err(StoreError::NotFound(order_id)),
        }
    }
}
