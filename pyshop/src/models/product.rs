//! 商品レコード

use super::{
    check_max_length, FieldKind, FieldSpec, FieldValue, FormErrors, FormReader, FromForm, Record,
    Validate,
};
use crate::common::error::CommonError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 商品名の最大文字数
pub const NAME_MAX_LENGTH: usize = 255;
/// 画像URLの最大文字数（ブラウザのURL長上限）
pub const IMAGE_URL_MAX_LENGTH: usize = 2083;

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// 自動採番ID
    pub id: i64,
    /// 商品名
    pub name: String,
    /// 価格（範囲チェックなし）
    pub price: f64,
    /// 在庫数
    pub stock: i64,
    /// 画像URL
    pub image_url: String,
}

/// 商品の作成・更新入力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// 商品名
    pub name: String,
    /// 価格
    pub price: f64,
    /// 在庫数
    pub stock: i64,
    /// 画像URL
    pub image_url: String,
}

impl Validate for NewProduct {
    fn validate(&self) -> Result<(), CommonError> {
        check_max_length("name", &self.name, NAME_MAX_LENGTH)?;
        check_max_length("image_url", &self.image_url, IMAGE_URL_MAX_LENGTH)?;
        Ok(())
    }
}

impl FromForm for NewProduct {
    fn from_form(form: &HashMap<String, String>) -> Result<Self, FormErrors> {
        let mut reader = FormReader::new(form);
        let draft = NewProduct {
            name: reader.text("name", NAME_MAX_LENGTH),
            price: reader.float("price"),
            stock: reader.integer("stock"),
            image_url: reader.text("image_url", IMAGE_URL_MAX_LENGTH),
        };
        reader.finish(draft)
    }
}

impl Record for Product {
    type Draft = NewProduct;

    const MODEL_NAME: &'static str = "product";
    const VERBOSE_NAME: &'static str = "Product";
    const VERBOSE_NAME_PLURAL: &'static str = "Products";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "name",
            label: "Name",
            kind: FieldKind::Text {
                max_length: NAME_MAX_LENGTH,
            },
        },
        FieldSpec {
            name: "price",
            label: "Price",
            kind: FieldKind::Float,
        },
        FieldSpec {
            name: "stock",
            label: "Stock",
            kind: FieldKind::Integer,
        },
        FieldSpec {
            name: "image_url",
            label: "Image url",
            kind: FieldKind::Text {
                max_length: IMAGE_URL_MAX_LENGTH,
            },
        },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", FieldValue::Text(self.name.clone())),
            ("price", FieldValue::Float(self.price)),
            ("stock", FieldValue::Integer(self.stock)),
            ("image_url", FieldValue::Text(self.image_url.clone())),
        ]
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}
