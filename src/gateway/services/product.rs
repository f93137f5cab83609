//! Product Service - catalog CRUD with input validation

use std::sync::Arc;

use rust_decimal::Decimal;
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::models::{Product, ProductInput};
use crate::persistence::{ProductRepository, RepositoryError};

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, req: ProductInput) -> ServiceResult<Product> {
        check_product(&req)?;
        let product = self.repo.create(&req).await?;
        tracing::info!(product_id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, req: ProductInput) -> ServiceResult<Product> {
        check_product(&req)?;
        self.repo.update(id, &req).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::ProductNotFound(id),
            other => other.into(),
        })
    }

    pub async fn get_product_by_id(&self, id: i64) -> ServiceResult<Product> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::ProductNotFound(id))
    }

    /// Hard delete; products still referenced by orders are kept
    pub async fn delete_product(&self, id: i64) -> ServiceResult<()> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::ProductNotFound(id),
            RepositoryError::InvalidReference(_) => ServiceError::ProductInUse(id),
            other => other.into(),
        })?;
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }

    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.list().await?)
    }
}

fn check_product(req: &ProductInput) -> ServiceResult<()> {
    if req.validate().is_err() || req.price <= Decimal::ZERO {
        return Err(ServiceError::InvalidProductData);
    }
    Ok(())
}
