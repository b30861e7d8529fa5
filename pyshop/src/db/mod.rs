//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// 商品管理
pub mod products;

/// オファー管理
pub mod offers;

/// Repository traitパターン
pub mod traits;
