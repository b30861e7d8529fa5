//! PyShop Server Entry Point

use clap::Parser;
use pyshop::cli::{Cli, Commands};
use pyshop::config::{self, LogConfig, ServerConfig};
use pyshop::{bootstrap, logging, server};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Migrate(args)) => pyshop::cli::migrate::execute(&args).await,
        Some(Commands::ShowMigrations(args)) => pyshop::cli::migrate::show(&args).await,
        Some(Commands::Serve(args)) => run_server(args.server_config()).await,
        None => run_server(ServerConfig::from_env()).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(server_config: ServerConfig) -> pyshop::common::error::ShopResult<()> {
    let state = bootstrap::initialize(&config::database_url()).await?;
    server::run(state, &server_config.bind_addr()).await
}
