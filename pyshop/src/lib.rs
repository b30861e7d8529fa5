//! PyShop Server
//!
//! 商品と割引オファーを保存し、商品一覧ページと管理画面（CRUD）を提供する。

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// HTTPハンドラー
pub mod api;

/// 管理画面
pub mod admin;

/// サーバー初期化
pub mod bootstrap;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// レコード型定義
pub mod models;

/// axumサーバー起動
pub mod server;

/// HTMLテンプレート
pub mod templates;

use common::error::ShopResult;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// 商品ストレージ
    pub products: db::products::ProductStorage,
    /// オファーストレージ
    pub offers: db::offers::OfferStorage,
    /// テンプレートレンダラー
    pub templates: templates::TemplateRenderer,
    /// 管理サイト
    pub admin_site: Arc<admin::AdminSite>,
}

impl AppState {
    /// マイグレーション済みのプールから状態を構築する
    pub fn new(db_pool: sqlx::SqlitePool) -> ShopResult<Self> {
        Ok(Self {
            products: db::products::ProductStorage::new(db_pool.clone()),
            offers: db::offers::OfferStorage::new(db_pool.clone()),
            templates: templates::TemplateRenderer::embedded()?,
            admin_site: Arc::new(admin::AdminSite::default_site(db_pool.clone())?),
            db_pool,
        })
    }
}
