//! 割引オファーレコード
//!
//! 特定の商品には紐付かない。

use super::{
    check_max_length, FieldKind, FieldSpec, FieldValue, FormErrors, FormReader, FromForm, Record,
    Validate,
};
use crate::common::error::CommonError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// オファーコードの最大文字数
pub const CODE_MAX_LENGTH: usize = 10;
/// 説明の最大文字数
pub const DESCRIPTION_MAX_LENGTH: usize = 255;

/// 割引オファー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    /// 自動採番ID
    pub id: i64,
    /// オファーコード（一意制約なし）
    pub code: String,
    /// 説明
    pub description: String,
    /// 割引率
    pub discount: f64,
}

/// オファーの作成・更新入力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffer {
    /// オファーコード
    pub code: String,
    /// 説明
    pub description: String,
    /// 割引率
    pub discount: f64,
}

impl Validate for NewOffer {
    fn validate(&self) -> Result<(), CommonError> {
        check_max_length("code", &self.code, CODE_MAX_LENGTH)?;
        check_max_length("description", &self.description, DESCRIPTION_MAX_LENGTH)?;
        Ok(())
    }
}

impl FromForm for NewOffer {
    fn from_form(form: &HashMap<String, String>) -> Result<Self, FormErrors> {
        let mut reader = FormReader::new(form);
        let draft = NewOffer {
            code: reader.text("code", CODE_MAX_LENGTH),
            description: reader.text("description", DESCRIPTION_MAX_LENGTH),
            discount: reader.float("discount"),
        };
        reader.finish(draft)
    }
}

impl Record for Offer {
    type Draft = NewOffer;

    const MODEL_NAME: &'static str = "offer";
    const VERBOSE_NAME: &'static str = "Offer";
    const VERBOSE_NAME_PLURAL: &'static str = "Offers";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "code",
            label: "Code",
            kind: FieldKind::Text {
                max_length: CODE_MAX_LENGTH,
            },
        },
        FieldSpec {
            name: "description",
            label: "Description",
            kind: FieldKind::Text {
                max_length: DESCRIPTION_MAX_LENGTH,
            },
        },
        FieldSpec {
            name: "discount",
            label: "Discount",
            kind: FieldKind::Float,
        },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("code", FieldValue::Text(self.code.clone())),
            ("description", FieldValue::Text(self.description.clone())),
            ("discount", FieldValue::Float(self.discount)),
        ]
    }

    fn display(&self) -> String {
        self.code.clone()
    }
}
