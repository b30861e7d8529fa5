//! 商品ページ
//!
//! `/products/`（HTML一覧）、`/products/new`（固定テキスト）、`/api/products`（JSON）

use super::error::AppError;
use crate::db::traits::RecordRepository;
use crate::models::Product;
use crate::AppState;
use axum::{extract::State, response::Html, Json};

/// GET /products/ - 全商品を保存順に表示
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let products = state.products.list().await?;

    let mut context = tera::Context::new();
    context.insert("products", &products);
    let body = state.templates.render("products/index.html", &context)?;

    Ok(Html(body))
}

/// GET /products/new - 固定テキスト
pub async fn new_products() -> &'static str {
    "New Products"
}

/// GET /api/products - 全商品（JSON）
pub async fn list_json(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list().await?))
}
