use anyhow::{Context, Result};
use sqlx::PgPool;

/// Create the service tables if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing PostgreSQL schema...");

    for (name, ddl) in [
        ("users", CREATE_USERS_TABLE),
        ("products", CREATE_PRODUCTS_TABLE),
        ("orders", CREATE_ORDERS_TABLE),
        ("audit_logs", CREATE_AUDIT_LOGS_TABLE),
    ] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create {} table", name))?;
    }

    tracing::info!("PostgreSQL schema ready");
    Ok(())
}

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL PRIMARY KEY,
    username      VARCHAR(50) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL DEFAULT 'User',
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id       BIGSERIAL PRIMARY KEY,
    name     TEXT NOT NULL,
    price    NUMERIC(12, 2) NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0
)
"#;

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id            BIGSERIAL PRIMARY KEY,
    customer_name TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'pending',
    total_price   NUMERIC(12, 2) NOT NULL,
    product_id    BIGINT NOT NULL REFERENCES products (id),
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    is_deleted    BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

const CREATE_AUDIT_LOGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS audit_logs (
    id         BIGSERIAL PRIMARY KEY,
    action     VARCHAR(64) NOT NULL,
    details    TEXT NOT NULL,
    user_id    BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_form_columns_are_unbounded() {
        assert!(CREATE_ORDERS_TABLE.contains("status        TEXT NOT NULL"));
        assert!(CREATE_USERS_TABLE.contains("role          TEXT NOT NULL"));
    }
}
