//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `ShopError`は`external_message()`と`status_code()`を提供し、
//! 内部詳細（SQL文やファイルパス）を含まないレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// shop error type
#[derive(Debug, Error)]
pub enum ShopError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate
pub type ShopResult<T> = Result<T, ShopError>;

impl ShopError {
    /// Returns a safe error message for external clients.
    ///
    /// The `Display` implementation carries full details and belongs in
    /// server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(CommonError::Validation(_)) => "Invalid request",
            Self::Common(CommonError::Config(_)) => "Configuration error",
            Self::NotFound(_) => "Not found",
            Self::Database(_) => "Database error",
            Self::Template(_) => "Internal server error",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tera::Error> for ShopError {
    fn from(err: tera::Error) -> Self {
        // tera はネストした原因を source() に持つため連結して残す
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ShopError::Template(message)
    }
}
