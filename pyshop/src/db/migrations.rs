// データベース初期化とマイグレーション実行
//
// マイグレーションは前進のみの追記型ログ（migrations/NNNN_*.sql）。ロールバックは提供しない。

use crate::common::error::{ShopError, ShopResult};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;

/// 適用済みマイグレーション
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AppliedMigration {
    /// バージョン番号（ファイル名の先頭の数字）
    pub version: i64,
    /// 説明（ファイル名の残り）
    pub description: String,
}

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/db.sqlite3"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(ShopError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> ShopResult<SqlitePool> {
    let pool = init_db_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// SQLite接続プールを初期化する
///
/// ファイルと親ディレクトリが存在しなければ作成する。
pub async fn init_db_pool(database_url: &str) -> ShopResult<SqlitePool> {
    // SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            let db_path = std::path::Path::new(path_without_params);
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ShopError::Database(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ShopError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    SqlitePool::connect_with(connect_options)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to connect to database: {}", e)))
}

/// 既存のデータベースにのみ接続する（ファイルやディレクトリは作成しない）
pub async fn open_existing(database_url: &str) -> ShopResult<SqlitePool> {
    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to check database: {}", e)))?
    {
        return Err(ShopError::Database(format!(
            "Database does not exist: {}",
            database_url
        )));
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ShopError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(false);

    SqlitePool::connect_with(connect_options)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to connect to database: {}", e)))
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// 適用済みのものはスキップされるため、何度呼んでもよい。
pub async fn run_migrations(pool: &SqlitePool) -> ShopResult<()> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// 適用済みマイグレーション一覧（バージョン順）
///
/// 一度もマイグレーションしていないDBでは履歴テーブルがないため空を返す。
pub async fn applied_migrations(pool: &SqlitePool) -> ShopResult<Vec<AppliedMigration>> {
    let history_table = sqlx::query(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_optional(pool)
    .await
    .map_err(|e| ShopError::Database(format!("Failed to inspect schema: {}", e)))?;
    if history_table.is_none() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, description FROM _sqlx_migrations WHERE success = 1 ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| ShopError::Database(format!("Failed to list migrations: {}", e)))
}
