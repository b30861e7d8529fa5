//! テスト共通ヘルパー

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pyshop::{api, AppState};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// テスト用のアプリを作成する（.oneshot()スタイルのテスト用）
pub async fn create_test_app() -> (Router, SqlitePool) {
    let db_pool = create_test_db_pool().await;
    let state = AppState::new(db_pool.clone()).expect("Failed to build app state");
    (api::create_app(state), db_pool)
}

/// テスト用のSQLiteデータベースプールを作成する
pub async fn create_test_db_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// GETしてステータスと本文を返す
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// フォームをPOSTしてレスポンスを返す
pub async fn post_form(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
) -> axum::response::Response {
    let body = serde_urlencoded::to_string(fields).unwrap();

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// レスポンス本文を文字列で取り出す
pub async fn body_string(response: axum::response::Response) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
