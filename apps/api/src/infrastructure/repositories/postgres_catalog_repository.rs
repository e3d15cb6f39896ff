use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Category, Product, ProductFilter};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::{CategoryRepository, ProductRepository};

const PRODUCT_COLUMNS: &str = r#"
    id, supplier_id, category_id, name, description, price, unit,
    min_order_quantity, stock_quantity, bulk_discount_price, bulk_discount_threshold,
    image_url, is_active, created_at, updated_at
"#;

/// PostgreSQL implementation of CategoryRepository
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, icon, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn create(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, icon, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unique_violation(e, "Category already exists"))?;

        Ok(())
    }
}

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Wraps a search term for ILIKE, escaping its wildcards
fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"
        ))
        .bind(product.id)
        .bind(product.supplier_id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.unit)
        .bind(product.min_order_quantity)
        .bind(product.stock_quantity)
        .bind(product.bulk_discount_price)
        .bind(product.bulk_discount_threshold)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::missing_reference(e, "Category"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(like_pattern);

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE is_active
              AND ($1::uuid IS NULL OR category_id = $1)
              AND ($2::uuid IS NULL OR supplier_id = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR description ILIKE $3)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.category_id)
        .bind(filter.supplier_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET category_id = $2, name = $3, description = $4, price = $5, unit = $6,
                min_order_quantity = $7, stock_quantity = $8,
                bulk_discount_price = $9, bulk_discount_threshold = $10,
                image_url = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.unit)
        .bind(product.min_order_quantity)
        .bind(product.stock_quantity)
        .bind(product.bulk_discount_price)
        .bind(product.bulk_discount_threshold)
        .bind(&product.image_url)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::missing_reference(e, "Category"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("Product"));
        }

        Ok(())
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("Product"));
        }

        Ok(())
    }
}
