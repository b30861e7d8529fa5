// オファーCRUD操作

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::traits::RecordRepository;
use crate::common::error::{ShopError, ShopResult};
use crate::models::{NewOffer, Offer, Validate};

/// オファーストレージ
#[derive(Clone)]
pub struct OfferStorage {
    pool: SqlitePool,
}

impl OfferStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository<Offer> for OfferStorage {
    async fn list(&self) -> ShopResult<Vec<Offer>> {
        sqlx::query_as::<_, Offer>(
            "SELECT id, code, description, discount FROM offers ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to list offers: {}", e)))
    }

    async fn get(&self, id: i64) -> ShopResult<Option<Offer>> {
        sqlx::query_as::<_, Offer>("SELECT id, code, description, discount FROM offers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ShopError::Database(format!("Failed to get offer: {}", e)))
    }

    async fn create(&self, draft: &NewOffer) -> ShopResult<Offer> {
        draft.validate()?;

        let result =
            sqlx::query("INSERT INTO offers (code, description, discount) VALUES (?, ?, ?)")
                .bind(&draft.code)
                .bind(&draft.description)
                .bind(draft.discount)
                .execute(&self.pool)
                .await
                .map_err(|e| ShopError::Database(format!("Failed to create offer: {}", e)))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, code = %draft.code, "Offer created");

        Ok(Offer {
            id,
            code: draft.code.clone(),
            description: draft.description.clone(),
            discount: draft.discount,
        })
    }

    async fn update(&self, id: i64, draft: &NewOffer) -> ShopResult<Option<Offer>> {
        draft.validate()?;

        let result =
            sqlx::query("UPDATE offers SET code = ?, description = ?, discount = ? WHERE id = ?")
                .bind(&draft.code)
                .bind(&draft.description)
                .bind(draft.discount)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| ShopError::Database(format!("Failed to update offer: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Offer {
            id,
            code: draft.code.clone(),
            description: draft.description.clone(),
            discount: draft.discount,
        }))
    }

    async fn delete(&self, id: i64) -> ShopResult<bool> {
        let result = sqlx::query("DELETE FROM offers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ShopError::Database(format!("Failed to delete offer: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> ShopResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ShopError::Database(format!("Failed to count offers: {}", e)))
    }
}
