//! PostgreSQL order repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{OrderRepository, RepositoryError, RepositoryResult};
use crate::models::{NewOrder, Order, OrderFilter, OrderUpdate};

const ORDER_COLUMNS: &str =
    "id, customer_name, status, total_price, product_id, created_at, updated_at, is_deleted";

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &NewOrder) -> RepositoryResult<Order> {
        let sql = format!(
            "INSERT INTO orders (customer_name, status, total_price, product_id) \
             VALUES ($1, $2, $3, $4) RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Order>(&sql)
            .bind(&order.customer_name)
            .bind(order.effective_status())
            .bind(order.total_price)
            .bind(order.product_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND is_deleted = FALSE");
        let row = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        changes: &OrderUpdate,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<Order> {
        let sql = format!(
            "UPDATE orders SET customer_name = $1, status = $2, total_price = $3, updated_at = $4 \
             WHERE id = $5 AND is_deleted = FALSE RETURNING {ORDER_COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&sql)
            .bind(&changes.customer_name)
            .bind(&changes.status)
            .bind(changes.total_price)
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn soft_delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE orders SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, filter: &OrderFilter) -> RepositoryResult<Vec<Order>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE is_deleted = FALSE"
        ));
        if let Some(status) = filter.status() {
            query.push(" AND status = ").push_bind(status.to_string());
        }
        if let Some(min) = filter.min_price() {
            query.push(" AND total_price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price() {
            query.push(" AND total_price <= ").push_bind(max);
        }
        query.push(" ORDER BY id");

        let rows = query.build_query_as::<Order>().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
