//! オファーAPI

use super::error::AppError;
use crate::db::traits::RecordRepository;
use crate::models::Offer;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api/offers - 全オファー（JSON、保存順）
pub async fn list_json(State(state): State<AppState>) -> Result<Json<Vec<Offer>>, AppError> {
    Ok(Json(state.offers.list().await?))
}
