//! ロギング初期化
//!
//! 標準出力（pretty / JSON）と、`PYSHOP_LOG_DIR` 指定時の日次ローテーションファイル出力。

use crate::common::error::{CommonError, ShopError};
use crate::config::{LogConfig, LogFormat};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "pyshop.log";

/// tracing サブスクライバーを初期化する
///
/// `RUST_LOG` が設定されていればそちらを優先する。
/// ファイル出力が有効な場合に返る `WorkerGuard` はプロセス終了まで保持すること
/// （Drop 時に未書き込みのログがフラッシュされる）。
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, ShopError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CommonError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let stdout_layer = match config.format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Pretty => fmt::layer().boxed(),
    };

    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                CommonError::Config(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ShopError::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(guard)
}
