//! レコード型定義
//!
//! Product / Offer の2種類のレコードと、管理画面がフィールド構成から
//! 一覧・フォームを自動生成するためのメタデータ。

pub mod offer;
pub mod product;

pub use offer::{NewOffer, Offer};
pub use product::{NewProduct, Product};

use crate::common::error::CommonError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// フィールドの型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 文字列（最大文字数つき）
    Text {
        /// 最大文字数（バイト数ではない）
        max_length: usize,
    },
    /// 浮動小数点数
    Float,
    /// 整数
    Integer,
}

impl FieldKind {
    /// フォームの `<input type>` 属性値
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Float | FieldKind::Integer => "number",
        }
    }

    /// 数値入力の `step` 属性値
    pub fn step(&self) -> Option<&'static str> {
        match self {
            FieldKind::Text { .. } => None,
            FieldKind::Float => Some("any"),
            FieldKind::Integer => Some("1"),
        }
    }

    /// 最大文字数（文字列のみ）
    pub fn max_length(&self) -> Option<usize> {
        match self {
            FieldKind::Text { max_length } => Some(*max_length),
            _ => None,
        }
    }
}

/// フィールド定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// カラム名（フォームのname属性と共通）
    pub name: &'static str,
    /// 表示ラベル
    pub label: &'static str,
    /// 型
    pub kind: FieldKind,
}

/// フィールド値
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 文字列
    Text(String),
    /// 浮動小数点数
    Float(f64),
    /// 整数
    Integer(i64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            // 整数値の浮動小数点は "10.0" のように小数点を残す
            FieldValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

/// フィールドごとのフォームエラー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// エラーを追加
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// エラーがないか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 指定フィールドのエラー
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 全エラー件数
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl From<CommonError> for FormErrors {
    fn from(err: CommonError) -> Self {
        let mut errors = FormErrors::default();
        errors.add(NON_FIELD_ERRORS, err.to_string());
        errors
    }
}

/// 特定フィールドに紐付かないエラーのキー
pub const NON_FIELD_ERRORS: &str = "__all__";

/// ストレージ層での検証（長さ制限のみ）
pub trait Validate {
    /// 検証
    fn validate(&self) -> Result<(), CommonError>;
}

/// フォーム入力からの変換
pub trait FromForm: Sized {
    /// `application/x-www-form-urlencoded` の値から生成
    fn from_form(form: &HashMap<String, String>) -> Result<Self, FormErrors>;
}

/// 管理対象レコード
pub trait Record: Serialize + Send + Sync + Sized + 'static {
    /// id を除いたフィールド値（作成・更新の入力）
    type Draft: Validate + FromForm + Send + Sync;

    /// URLで使うモデル名（小文字）
    const MODEL_NAME: &'static str;
    /// 表示名（単数）
    const VERBOSE_NAME: &'static str;
    /// 表示名（複数）
    const VERBOSE_NAME_PLURAL: &'static str;
    /// フィールド定義（id を除く、宣言順）
    const FIELDS: &'static [FieldSpec];

    /// 自動採番ID
    fn id(&self) -> i64;

    /// フィールド値（`FIELDS` と同じ順序）
    fn field_values(&self) -> Vec<(&'static str, FieldValue)>;

    /// 一覧や削除確認での表示文字列
    fn display(&self) -> String;
}

/// 文字数制限の検証
pub fn check_max_length(field: &str, value: &str, max_length: usize) -> Result<(), CommonError> {
    let len = value.chars().count();
    if len > max_length {
        return Err(CommonError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field, max_length, len
        )));
    }
    Ok(())
}

/// フォーム値の読み取りとエラー収集
///
/// 全フィールド必須。文字列は前後の空白を除去する。
pub(crate) struct FormReader<'a> {
    form: &'a HashMap<String, String>,
    errors: FormErrors,
}

impl<'a> FormReader<'a> {
    pub(crate) fn new(form: &'a HashMap<String, String>) -> Self {
        Self {
            form,
            errors: FormErrors::default(),
        }
    }

    fn required(&mut self, field: &str) -> Option<&'a str> {
        match self.form.get(field).map(|v| v.trim()) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.errors.add(field, "This field is required.");
                None
            }
        }
    }

    pub(crate) fn text(&mut self, field: &str, max_length: usize) -> String {
        let Some(value) = self.required(field) else {
            return String::new();
        };
        let len = value.chars().count();
        if len > max_length {
            self.errors.add(
                field,
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    max_length, len
                ),
            );
        }
        value.to_string()
    }

    pub(crate) fn float(&mut self, field: &str) -> f64 {
        let Some(value) = self.required(field) else {
            return 0.0;
        };
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.errors.add(field, "Enter a number.");
                0.0
            }
        }
    }

    pub(crate) fn integer(&mut self, field: &str) -> i64 {
        let Some(value) = self.required(field) else {
            return 0;
        };
        match value.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                self.errors.add(field, "Enter a whole number.");
                0
            }
        }
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}
