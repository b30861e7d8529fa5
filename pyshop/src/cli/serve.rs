//! serve サブコマンド
//!
//! Webサーバーを起動します。

use crate::config::ServerConfig;
use clap::Args;

/// serve サブコマンドの引数
///
/// 省略した値は環境変数（`PYSHOP_PORT` / 旧 `PORT` など）から補う。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address [default: 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

impl ServeArgs {
    /// コマンドライン引数を優先し、残りを環境変数で埋めた設定
    pub fn server_config(&self) -> ServerConfig {
        let env = ServerConfig::from_env();
        ServerConfig {
            host: self.host.clone().unwrap_or(env.host),
            port: self.port.unwrap_or(env.port),
        }
    }
}
