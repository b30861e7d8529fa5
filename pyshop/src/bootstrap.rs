//! サーバー初期化ロジック
//!
//! データベース接続、マイグレーション、テンプレートと管理サイトの構築を担当する。

use crate::common::error::ShopResult;
use crate::db::migrations;
use crate::AppState;
use tracing::info;

/// サーバー初期化を実行する
///
/// DBファイル（と親ディレクトリ）がなければ作成し、未適用のマイグレーションを
/// 適用してから `AppState` を返す。
pub async fn initialize(database_url: &str) -> ShopResult<AppState> {
    info!("PyShop v{}", env!("CARGO_PKG_VERSION"));
    info!("Connecting to database: {}", database_url);

    let db_pool = migrations::initialize_database(database_url).await?;
    let state = AppState::new(db_pool)?;

    info!(
        models = state.admin_site.models().len(),
        "Admin site initialized"
    );
    Ok(state)
}
