//! 管理サイト（登録済みモデルのレジストリ）

use super::{ModelAdmin, RegisteredModel};
use crate::common::error::{CommonError, ShopResult};
use crate::db::offers::OfferStorage;
use crate::db::products::ProductStorage;
use crate::models::{Offer, Product};
use sqlx::SqlitePool;
use std::sync::Arc;

/// 管理サイト
///
/// 登録順に並ぶ。モデル名は一意。
#[derive(Clone)]
pub struct AdminSite {
    app_label: &'static str,
    site_header: String,
    models: Vec<Arc<dyn ModelAdmin>>,
}

impl AdminSite {
    /// 空のサイトを作成
    pub fn new(app_label: &'static str) -> Self {
        Self {
            app_label,
            site_header: "PyShop administration".to_string(),
            models: Vec::new(),
        }
    }

    /// Product（name / price / stock）と Offer（code / discount）を登録したサイト
    pub fn default_site(pool: SqlitePool) -> ShopResult<Self> {
        let mut site = Self::new("products");
        site.register(
            RegisteredModel::<Product, _>::new(ProductStorage::new(pool.clone()))
                .with_list_display(&["name", "price", "stock"])?,
        )?;
        site.register(
            RegisteredModel::<Offer, _>::new(OfferStorage::new(pool))
                .with_list_display(&["code", "discount"])?,
        )?;
        Ok(site)
    }

    /// モデルを登録
    pub fn register(&mut self, model: impl ModelAdmin + 'static) -> ShopResult<()> {
        if self.get(model.model_name()).is_some() {
            return Err(CommonError::Config(format!(
                "Model '{}' is already registered",
                model.model_name()
            ))
            .into());
        }
        tracing::debug!(model = model.model_name(), "Registered admin model");
        self.models.push(Arc::new(model));
        Ok(())
    }

    /// モデル名で検索
    pub fn get(&self, model_name: &str) -> Option<Arc<dyn ModelAdmin>> {
        self.models
            .iter()
            .find(|m| m.model_name() == model_name)
            .cloned()
    }

    /// 登録済みモデル（登録順）
    pub fn models(&self) -> &[Arc<dyn ModelAdmin>] {
        &self.models
    }

    /// URL上のアプリラベル
    pub fn app_label(&self) -> &'static str {
        self.app_label
    }

    /// ヘッダー表示名
    pub fn site_header(&self) -> &str {
        &self.site_header
    }
}
