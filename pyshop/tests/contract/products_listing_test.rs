//! 商品一覧ページ Contract Tests
//!
//! GET /products/, GET /products/new, GET /

use axum::http::StatusCode;
use pyshop::db::products::ProductStorage;
use pyshop::db::traits::RecordRepository;
use pyshop::models::NewProduct;
use sqlx::SqlitePool;

use crate::support::{create_test_app, get};

async fn add_product(pool: &SqlitePool, name: &str, price: f64, stock: i64) {
    ProductStorage::new(pool.clone())
        .create(&NewProduct {
            name: name.to_string(),
            price,
            stock,
            image_url: "http://img.example/x.png".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_listing_shows_every_product_in_storage_order() {
    let (app, pool) = create_test_app().await;
    add_product(&pool, "Mug", 9.99, 5).await;
    add_product(&pool, "Kettle", 24.5, 0).await;
    add_product(&pool, "Spoon", 1.0, 100).await;

    let (status, body) = get(&app, "/products/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("data-product-id=").count(), 3);

    let mug = body.find("Mug").unwrap();
    let kettle = body.find("Kettle").unwrap();
    let spoon = body.find("Spoon").unwrap();
    assert!(mug < kettle && kettle < spoon);

    assert!(body.contains("$9.99"));
    assert!(body.contains("$24.50"));
    assert!(body.contains("100 in stock"));
}

#[tokio::test]
async fn test_listing_empty_store() {
    let (app, _pool) = create_test_app().await;

    let (status, body) = get(&app, "/products/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("data-product-id=").count(), 0);
    assert!(body.contains("No products available."));
}

#[tokio::test]
async fn test_listing_escapes_product_name() {
    let (app, pool) = create_test_app().await;
    add_product(&pool, "<script>alert(1)</script>", 1.0, 1).await;

    let (_, body) = get(&app, "/products/").await;
    assert!(!body.contains("<script>alert(1)"));
    assert!(body.contains("&lt;script&gt;alert(1)"));
}

#[tokio::test]
async fn test_new_products_returns_fixed_text() {
    let (app, pool) = create_test_app().await;
    add_product(&pool, "Mug", 9.99, 5).await;

    let (status, body) = get(&app, "/products/new").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "New Products");
}

#[tokio::test]
async fn test_products_without_trailing_slash_redirects() {
    let (app, _pool) = create_test_app().await;

    let (status, _) = get(&app, "/products").await;
    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
}
