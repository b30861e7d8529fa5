//! 管理画面 Contract Tests
//!
//! /admin/, /admin/products/{model}/ 配下の一覧・追加・変更・削除

use axum::http::{header, StatusCode};
use pyshop::db::offers::OfferStorage;
use pyshop::db::products::ProductStorage;
use pyshop::db::traits::RecordRepository;

use crate::support::{body_string, create_test_app, get, post_form};

const PRODUCT_FORM: &[(&str, &str)] = &[
    ("name", "Desk Lamp"),
    ("price", "19.99"),
    ("stock", "7"),
    ("image_url", "http://img.example/lamp.png"),
];

#[tokio::test]
async fn test_admin_index_lists_models_with_counts() {
    let (app, _pool) = create_test_app().await;
    post_form(&app, "/admin/products/product/add/", PRODUCT_FORM).await;

    let (status, body) = get(&app, "/admin/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("PyShop administration"));

    let products = body.find("Products").unwrap();
    let offers = body.find("Offers").unwrap();
    assert!(products < offers);
    assert!(body.contains("<td class=\"count\">1</td>"));
    assert!(body.contains("<td class=\"count\">0</td>"));
}

#[tokio::test]
async fn test_add_product_redirects_to_change_list() {
    let (app, pool) = create_test_app().await;

    let response = post_form(&app, "/admin/products/product/add/", PRODUCT_FORM).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/admin/products/product/"
    );

    let products = ProductStorage::new(pool).list().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Desk Lamp");
    assert_eq!(products[0].price, 19.99);
    assert_eq!(products[0].stock, 7);

    let (_, listing) = get(&app, "/products/").await;
    assert!(listing.contains("Desk Lamp"));
    assert!(listing.contains("$19.99"));
}

#[tokio::test]
async fn test_change_list_shows_list_display_columns() {
    let (app, _pool) = create_test_app().await;
    post_form(&app, "/admin/products/product/add/", PRODUCT_FORM).await;

    let (status, body) = get(&app, "/admin/products/product/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th scope=\"col\">Name</th>"));
    assert!(body.contains("<th scope=\"col\">Price</th>"));
    assert!(body.contains("<th scope=\"col\">Stock</th>"));
    assert!(!body.contains("<th scope=\"col\">Image url</th>"));
    assert_eq!(body.matches("data-object-id=").count(), 1);
    assert!(body.contains("<td>19.99</td>"));
}

#[tokio::test]
async fn test_overlong_name_rerenders_form_and_stores_nothing() {
    let (app, pool) = create_test_app().await;
    let long_name = "x".repeat(256);

    let response = post_form(
        &app,
        "/admin/products/product/add/",
        &[
            ("name", long_name.as_str()),
            ("price", "1.00"),
            ("stock", "1"),
            ("image_url", "http://img.example/a.png"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Ensure this value has at most 255 characters (it has 256)."));
    assert!(body.contains("Please correct the error below."));

    assert_eq!(ProductStorage::new(pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_and_malformed_fields_reported() {
    let (app, pool) = create_test_app().await;

    let response = post_form(
        &app,
        "/admin/products/product/add/",
        &[("name", "Lamp"), ("price", "cheap"), ("stock", "1.5")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Enter a number."));
    assert!(body.contains("Enter a whole number."));
    assert!(body.contains("This field is required."));
    assert!(body.contains("value=\"Lamp\""));

    assert_eq!(ProductStorage::new(pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_change_product_updates_listing() {
    let (app, pool) = create_test_app().await;
    post_form(&app, "/admin/products/product/add/", PRODUCT_FORM).await;
    let id = ProductStorage::new(pool.clone()).list().await.unwrap()[0].id;

    let (status, form) = get(&app, &format!("/admin/products/product/{}/change/", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(form.contains("value=\"Desk Lamp\""));

    let response = post_form(
        &app,
        &format!("/admin/products/product/{}/change/", id),
        &[
            ("name", "Floor Lamp"),
            ("price", "49"),
            ("stock", "2"),
            ("image_url", "http://img.example/floor.png"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let product = ProductStorage::new(pool).get(id).await.unwrap().unwrap();
    assert_eq!(product.name, "Floor Lamp");
    assert_eq!(product.price, 49.0);

    let (_, listing) = get(&app, "/products/").await;
    assert!(listing.contains("Floor Lamp"));
    assert!(!listing.contains("Desk Lamp"));
}

#[tokio::test]
async fn test_invalid_change_keeps_stored_values() {
    let (app, pool) = create_test_app().await;
    post_form(&app, "/admin/products/product/add/", PRODUCT_FORM).await;
    let id = ProductStorage::new(pool.clone()).list().await.unwrap()[0].id;

    let response = post_form(
        &app,
        &format!("/admin/products/product/{}/change/", id),
        &[
            ("name", ""),
            ("price", "5"),
            ("stock", "5"),
            ("image_url", "http://img.example/lamp.png"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("This field is required."));

    let product = ProductStorage::new(pool).get(id).await.unwrap().unwrap();
    assert_eq!(product.name, "Desk Lamp");
}

#[tokio::test]
async fn test_delete_product_removes_it_from_listing() {
    let (app, pool) = create_test_app().await;
    post_form(&app, "/admin/products/product/add/", PRODUCT_FORM).await;
    let id = ProductStorage::new(pool.clone()).list().await.unwrap()[0].id;

    let (status, confirm) = get(&app, &format!("/admin/products/product/{}/delete/", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(confirm.contains("Are you sure"));
    assert!(confirm.contains("Desk Lamp"));

    let response = post_form(&app, &format!("/admin/products/product/{}/delete/", id), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, listing) = get(&app, "/products/").await;
    assert!(!listing.contains("Desk Lamp"));
    assert_eq!(listing.matches("data-product-id=").count(), 0);
    assert_eq!(ProductStorage::new(pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_object_is_not_found() {
    let (app, _pool) = create_test_app().await;

    let (status, _) = get(&app, "/admin/products/product/42/change/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/admin/products/product/abc/change/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = post_form(&app, "/admin/products/product/42/delete/", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_form(&app, "/admin/products/product/42/change/", PRODUCT_FORM).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_model_or_app_is_not_found() {
    let (app, _pool) = create_test_app().await;

    let (status, _) = get(&app, "/admin/products/customer/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/admin/shop/product/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_offer() {
    let (app, pool) = create_test_app().await;

    let response = post_form(
        &app,
        "/admin/products/offer/add/",
        &[
            ("code", "SUMMER10"),
            ("description", "Summer sale"),
            ("discount", "0.1"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/admin/products/offer/"
    );

    let offers = OfferStorage::new(pool).list().await.unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].code, "SUMMER10");
    assert_eq!(offers[0].discount, 0.1);

    let (_, body) = get(&app, "/admin/products/offer/").await;
    assert!(body.contains("SUMMER10"));
    assert!(body.contains("<th scope=\"col\">Discount</th>"));
}

#[tokio::test]
async fn test_offer_code_length_limit() {
    let (app, pool) = create_test_app().await;

    let response = post_form(
        &app,
        "/admin/products/offer/add/",
        &[
            ("code", "ELEVENCHARS"),
            ("description", "Too long"),
            ("discount", "5"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains("Ensure this value has at most 10 characters (it has 11)."));

    assert_eq!(OfferStorage::new(pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_form_values_with_reserved_characters_are_stored_verbatim() {
    let (app, pool) = create_test_app().await;

    let response = post_form(
        &app,
        "/admin/products/product/add/",
        &[
            ("name", "Tea & Café = 100% + more"),
            ("price", "3.5"),
            ("stock", "4"),
            ("image_url", "http://img.example/tea.png?size=large&fmt=webp"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let products = ProductStorage::new(pool).list().await.unwrap();
    assert_eq!(products[0].name, "Tea & Café = 100% + more");
    assert_eq!(
        products[0].image_url,
        "http://img.example/tea.png?size=large&fmt=webp"
    );
}
