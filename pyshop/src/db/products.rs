// 商品CRUD操作

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::traits::RecordRepository;
use crate::common::error::{ShopError, ShopResult};
use crate::models::{NewProduct, Product, Validate};

/// 商品ストレージ
#[derive(Clone)]
pub struct ProductStorage {
    pool: SqlitePool,
}

impl ProductStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Product> for ProductStorage {
    async fn list(&self) -> ShopResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock, image_url FROM products ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to list products: {}", e)))
    }

    async fn get(&self, id: i64) -> ShopResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock, image_url FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to get product: {}", e)))
    }

    async fn create(&self, draft: &NewProduct) -> ShopResult<Product> {
        draft.validate()?;

        let result = sqlx::query(
            "INSERT INTO products (name, price, stock, image_url) VALUES (?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(&draft.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to create product: {}", e)))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, name = %draft.name, "Product created");

        Ok(Product {
            id,
            name: draft.name.clone(),
            price: draft.price,
            stock: draft.stock,
            image_url: draft.image_url.clone(),
        })
    }

    async fn update(&self, id: i64, draft: &NewProduct) -> ShopResult<Option<Product>> {
        draft.validate()?;

        let result = sqlx::query(
            "UPDATE products SET name = ?, price = ?, stock = ?, image_url = ? WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(&draft.image_url)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to update product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Product {
            id,
            name: draft.name.clone(),
            price: draft.price,
            stock: draft.stock,
            image_url: draft.image_url.clone(),
        }))
    }

    async fn delete(&self, id: i64) -> ShopResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ShopError::Database(format!("Failed to delete product: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> ShopResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ShopError::Database(format!("Failed to count products: {}", e)))
    }
}
