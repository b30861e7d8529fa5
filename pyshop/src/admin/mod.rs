//! 管理画面（汎用CRUD）
//!
//! レコード種別ごとのフィールド定義から一覧・追加・変更・削除画面を生成する。
//! 種別ごとの設定は一覧に表示するフィールド（`list_display`）のみ。

mod site;

pub use site::AdminSite;

use crate::common::error::{CommonError, ShopError, ShopResult};
use crate::db::traits::RecordRepository;
use crate::models::{FieldSpec, FormErrors, FromForm, Record};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

/// 一覧の1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminRow {
    /// レコードID
    pub id: i64,
    /// `list_display` の順に整形した値
    pub values: Vec<String>,
}

/// 変更フォーム用のレコード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminObject {
    /// レコードID
    pub id: i64,
    /// 表示文字列
    pub display: String,
    /// フィールド名 → 整形済みの値
    pub values: BTreeMap<String, String>,
}

impl AdminObject {
    fn from_record<R: Record>(record: &R) -> Self {
        Self {
            id: record.id(),
            display: record.display(),
            values: record
                .field_values()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// フォーム送信の結果
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// 保存成功
    Saved(AdminObject),
    /// 入力エラー（何も保存していない）
    Invalid(FormErrors),
}

/// 管理対象モデル
///
/// `Record` の型情報を消去し、`AdminSite` がモデル名で引けるようにする。
#[async_trait]
pub trait ModelAdmin: Send + Sync {
    /// URL上のモデル名
    fn model_name(&self) -> &'static str;
    /// 表示名（単数）
    fn verbose_name(&self) -> &'static str;
    /// 表示名（複数）
    fn verbose_name_plural(&self) -> &'static str;
    /// フォームに並べるフィールド
    fn fields(&self) -> &'static [FieldSpec];
    /// 一覧の列見出し
    fn list_columns(&self) -> Vec<&'static str>;

    /// 一覧（保存順）
    async fn list_rows(&self) -> ShopResult<Vec<AdminRow>>;
    /// 1件取得
    async fn get_object(&self, id: i64) -> ShopResult<Option<AdminObject>>;
    /// フォーム値から作成
    async fn create_from_form(&self, form: &HashMap<String, String>) -> ShopResult<FormOutcome>;
    /// フォーム値で更新。対象がなければ `None`
    async fn update_from_form(
        &self,
        id: i64,
        form: &HashMap<String, String>,
    ) -> ShopResult<Option<FormOutcome>>;
    /// 削除
    async fn delete(&self, id: i64) -> ShopResult<bool>;
    /// 件数
    async fn count(&self) -> ShopResult<i64>;
}

/// `Record` + `RecordRepository` を `ModelAdmin` として登録するためのアダプタ
pub struct RegisteredModel<R, S> {
    storage: S,
    list_display: Vec<&'static str>,
    _record: PhantomData<fn() -> R>,
}

impl<R, S> RegisteredModel<R, S>
where
    R: Record,
    S: RecordRepository<R>,
{
    /// 一覧には表示文字列のみを出す
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            list_display: Vec::new(),
            _record: PhantomData,
        }
    }

    /// 一覧に表示するフィールドを指定
    ///
    /// 存在しないフィールド名は設定エラー。
    pub fn with_list_display(mut self, fields: &[&'static str]) -> ShopResult<Self> {
        for name in fields {
            if !R::FIELDS.iter().any(|f| f.name == *name) {
                return Err(CommonError::Config(format!(
                    "list_display refers to unknown field '{}' on {}",
                    name,
                    R::MODEL_NAME
                ))
                .into());
            }
        }
        self.list_display = fields.to_vec();
        Ok(self)
    }

    fn to_row(&self, record: &R) -> AdminRow {
        if self.list_display.is_empty() {
            return AdminRow {
                id: record.id(),
                values: vec![record.display()],
            };
        }
        let values = record.field_values();
        AdminRow {
            id: record.id(),
            values: self
                .list_display
                .iter()
                .map(|name| {
                    values
                        .iter()
                        .find(|(field, _)| field == name)
                        .map(|(_, value)| value.to_string())
                        .unwrap_or_default()
                })
                .collect(),
        }
    }
}

/// ストレージ層の検証エラーはフォームエラーとして返す
fn into_outcome<R: Record>(result: ShopResult<R>) -> ShopResult<FormOutcome> {
    match result {
        Ok(record) => Ok(FormOutcome::Saved(AdminObject::from_record(&record))),
        Err(ShopError::Common(err @ CommonError::Validation(_))) => {
            Ok(FormOutcome::Invalid(err.into()))
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl<R, S> ModelAdmin for RegisteredModel<R, S>
where
    R: Record,
    S: RecordRepository<R>,
{
    fn model_name(&self) -> &'static str {
        R::MODEL_NAME
    }

    fn verbose_name(&self) -> &'static str {
        R::VERBOSE_NAME
    }

    fn verbose_name_plural(&self) -> &'static str {
        R::VERBOSE_NAME_PLURAL
    }

    fn fields(&self) -> &'static [FieldSpec] {
        R::FIELDS
    }

    fn list_columns(&self) -> Vec<&'static str> {
        if self.list_display.is_empty() {
            return vec![R::VERBOSE_NAME];
        }
        self.list_display
            .iter()
            .filter_map(|name| R::FIELDS.iter().find(|f| f.name == *name))
            .map(|f| f.label)
            .collect()
    }

    async fn list_rows(&self) -> ShopResult<Vec<AdminRow>> {
        let records = self.storage.list().await?;
        Ok(records.iter().map(|r| self.to_row(r)).collect())
    }

    async fn get_object(&self, id: i64) -> ShopResult<Option<AdminObject>> {
        let record = self.storage.get(id).await?;
        Ok(record.as_ref().map(AdminObject::from_record))
    }

    async fn create_from_form(&self, form: &HashMap<String, String>) -> ShopResult<FormOutcome> {
        let draft = match R::Draft::from_form(form) {
            Ok(draft) => draft,
            Err(errors) => return Ok(FormOutcome::Invalid(errors)),
        };
        into_outcome(self.storage.create(&draft).await)
    }

    async fn update_from_form(
        &self,
        id: i64,
        form: &HashMap<String, String>,
    ) -> ShopResult<Option<FormOutcome>> {
        if self.storage.get(id).await?.is_none() {
            return Ok(None);
        }
        let draft = match R::Draft::from_form(form) {
            Ok(draft) => draft,
            Err(errors) => return Ok(Some(FormOutcome::Invalid(errors))),
        };
        match self.storage.update(id, &draft).await {
            // 取得後に削除された場合
            Ok(None) => Ok(None),
            Ok(Some(record)) => into_outcome(Ok(record)).map(Some),
            Err(e) => into_outcome::<R>(Err(e)).map(Some),
        }
    }

    async fn delete(&self, id: i64) -> ShopResult<bool> {
        self.storage.delete(id).await
    }

    async fn count(&self) -> ShopResult<i64> {
        self.storage.count().await
    }
}
