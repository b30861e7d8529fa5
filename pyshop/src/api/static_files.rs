//! 埋め込み静的ファイル配信（`/static/*path`）

use super::error::AppError;
use crate::common::error::ShopError;
use axum::{extract::Path, http::header, response::IntoResponse};
use include_dir::{include_dir, Dir};

static STATIC_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// GET /static/*path
pub async fn serve(Path(path): Path<String>) -> Result<impl IntoResponse, AppError> {
    let path = path.trim_start_matches('/');
    let file = STATIC_DIR
        .get_file(path)
        .ok_or_else(|| ShopError::NotFound(format!("static file {}", path)))?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, mime.essence_str().to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        file.contents(),
    ))
}
