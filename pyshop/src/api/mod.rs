//! HTTPルーティング
//!
//! 公開ページ、管理画面、JSON API、静的ファイルを1つの `Router` にまとめる。

pub mod admin;
pub mod error;
pub mod offers;
pub mod products;
pub mod static_files;
pub mod system;

use crate::AppState;
use axum::{http::StatusCode, response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;

/// アプリケーションのルーターを作成
pub fn create_app(state: AppState) -> Router {
    let shop_routes = Router::new()
        .route("/", get(|| async { Redirect::permanent("/products/") }))
        .route("/products", get(|| async { Redirect::permanent("/products/") }))
        .route("/products/", get(products::index))
        .route("/products/new", get(products::new_products));

    let admin_routes = Router::new()
        .route("/admin", get(|| async { Redirect::permanent("/admin/") }))
        .route("/admin/", get(admin::index))
        .route("/admin/:app/:model/", get(admin::change_list))
        .route(
            "/admin/:app/:model/add/",
            get(admin::add_form).post(admin::add_submit),
        )
        .route(
            "/admin/:app/:model/:id/change/",
            get(admin::change_form).post(admin::change_submit),
        )
        .route(
            "/admin/:app/:model/:id/delete/",
            get(admin::delete_confirm).post(admin::delete_submit),
        );

    let api_routes = Router::new()
        .route("/api/health", get(system::health))
        .route("/api/products", get(products::list_json))
        .route("/api/offers", get(offers::list_json));

    Router::new()
        .merge(shop_routes)
        .merge(admin_routes)
        .merge(api_routes)
        .route("/static/*path", get(static_files::serve))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
