//! migrate / showmigrations サブコマンド

use crate::common::error::ShopResult;
use crate::db::migrations;
use clap::Args;

/// migrate / showmigrations の引数
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Database URL (overrides PYSHOP_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl MigrateArgs {
    fn resolve_database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(crate::config::database_url)
    }
}

/// 未適用のマイグレーションを適用する
pub async fn execute(args: &MigrateArgs) -> ShopResult<()> {
    let url = args.resolve_database_url();
    let pool = migrations::initialize_database(&url).await?;
    let applied = migrations::applied_migrations(&pool).await?;
    println!("Applied {} migration(s) to {}", applied.len(), url);
    pool.close().await;
    Ok(())
}

/// 適用済みマイグレーションを表示する
pub async fn show(args: &MigrateArgs) -> ShopResult<()> {
    let url = args.resolve_database_url();
    let pool = migrations::open_existing(&url).await?;
    let applied = migrations::applied_migrations(&pool).await?;
    println!("{}", format_migrations(&applied));
    pool.close().await;
    Ok(())
}

fn format_migrations(applied: &[migrations::AppliedMigration]) -> String {
    if applied.is_empty() {
        return "products\n (no migrations)".to_string();
    }
    let mut out = String::from("products");
    for m in applied {
        out.push_str(&format!("\n [X] {:04}_{}", m.version, m.description.replace(' ', "_")));
    }
    out
}
