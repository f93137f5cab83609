//! PostgreSQL product repository

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProductRepository, RepositoryError, RepositoryResult};
use crate::models::{Product, ProductInput};

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &ProductInput) -> RepositoryResult<Product> {
        let row = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price, quantity) VALUES ($1, $2, $3) \
             RETURNING id, name, price, quantity",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, product: &ProductInput) -> RepositoryResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $1, price = $2, quantity = $3 WHERE id = $4 \
             RETURNING id, name, price, quantity",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, quantity FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
