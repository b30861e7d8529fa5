//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::{CommonError, ShopError};
use axum::response::IntoResponse;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub ShopError);

impl From<ShopError> for AppError {
    fn from(err: ShopError) -> Self {
        AppError(err)
    }
}

impl From<CommonError> for AppError {
    fn from(err: CommonError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // 詳細はログのみに出し、レスポンスには external_message() を使う
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self.0);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self.0);
        }

        (status, self.0.external_message()).into_response()
    }
}
