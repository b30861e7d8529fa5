//! システムAPI

use super::error::AppError;
use crate::common::error::ShopError;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" 固定
    pub status: &'static str,
    /// バージョン
    pub version: &'static str,
}

/// GET /api/health - DB疎通を確認
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1")
        .execute(&state.db_pool)
        .await
        .map_err(|e| ShopError::Database(format!("Health check failed: {}", e)))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
