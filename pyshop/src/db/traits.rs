//! Repository traitパターン定義
//!
//! レコード種別ごとのCRUD操作を抽象化し、管理画面から汎用的に扱えるようにする。

use async_trait::async_trait;

use crate::common::error::ShopResult;
use crate::models::Record;

/// レコードCRUD操作のRepository trait
///
/// 一覧は常に保存順（id昇順）。
#[async_trait]
pub trait RecordRepository<R: Record>: Send + Sync {
    /// 全件取得
    async fn list(&self) -> ShopResult<Vec<R>>;
    /// IDで取得
    async fn get(&self, id: i64) -> ShopResult<Option<R>>;
    /// 作成（IDは自動採番）
    async fn create(&self, draft: &R::Draft) -> ShopResult<R>;
    /// 更新。存在しなければ `None`
    async fn update(&self, id: i64, draft: &R::Draft) -> ShopResult<Option<R>>;
    /// 削除。削除できたら `true`
    async fn delete(&self, id: i64) -> ShopResult<bool>;
    /// 件数
    async fn count(&self) -> ShopResult<i64>;
}
