//! 商品とオファーが互いに影響しないこと

use pyshop::db::offers::OfferStorage;
use pyshop::db::products::ProductStorage;
use pyshop::db::traits::RecordRepository;
use pyshop::models::{NewOffer, NewProduct};

use crate::support::{create_test_app, get, post_form};

#[tokio::test]
async fn test_offers_never_appear_in_product_listing() {
    let (app, pool) = create_test_app().await;
    let offers = OfferStorage::new(pool.clone());
    for code in ["SPRING", "SUMMER", "AUTUMN"] {
        offers
            .create(&NewOffer {
                code: code.to_string(),
                description: format!("{} deal", code),
                discount: 10.0,
            })
            .await
            .unwrap();
    }

    let (_, body) = get(&app, "/products/").await;
    assert_eq!(body.matches("data-product-id=").count(), 0);
    assert!(!body.contains("SPRING"));
}

#[tokio::test]
async fn test_deleting_offer_leaves_products() {
    let (app, pool) = create_test_app().await;
    let product = ProductStorage::new(pool.clone())
        .create(&NewProduct {
            name: "Teapot".to_string(),
            price: 30.0,
            stock: 3,
            image_url: "http://img.example/teapot.png".to_string(),
        })
        .await
        .unwrap();
    let offer = OfferStorage::new(pool.clone())
        .create(&NewOffer {
            code: "TEA".to_string(),
            description: "Tea week".to_string(),
            discount: 3.0,
        })
        .await
        .unwrap();

    // 同じIDでもオファー側の削除は商品に影響しない
    assert_eq!(product.id, offer.id);
    let response = post_form(
        &app,
        &format!("/admin/products/offer/{}/delete/", offer.id),
        &[],
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);

    let (_, body) = get(&app, "/products/").await;
    assert!(body.contains("Teapot"));
    assert_eq!(OfferStorage::new(pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_product_leaves_offers() {
    let (app, pool) = create_test_app().await;
    let product = ProductStorage::new(pool.clone())
        .create(&NewProduct {
            name: "Toaster".to_string(),
            price: 45.0,
            stock: 1,
            image_url: "http://img.example/toaster.png".to_string(),
        })
        .await
        .unwrap();
    let offers = OfferStorage::new(pool.clone());
    for code in ["BREAKFAST", "BRUNCH"] {
        offers
            .create(&NewOffer {
                code: code.to_string(),
                description: format!("{} deal", code),
                discount: 2.5,
            })
            .await
            .unwrap();
    }

    let (_, offers_before) = get(&app, "/api/offers").await;
    let (_, change_list_before) = get(&app, "/admin/products/offer/").await;

    let response = post_form(
        &app,
        &format!("/admin/products/product/{}/delete/", product.id),
        &[],
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    assert_eq!(ProductStorage::new(pool).count().await.unwrap(), 0);

    let (_, offers_after) = get(&app, "/api/offers").await;
    let (_, change_list_after) = get(&app, "/admin/products/offer/").await;
    assert_eq!(offers_before, offers_after);
    assert_eq!(change_list_before, change_list_after);
    assert_eq!(change_list_after.matches("data-object-id=").count(), 2);
}
