//! CLI module for pyshop
//!
//! Provides command-line interface for running the shop server and
//! managing the database schema.

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// PyShop - product catalog with an administrative back office
#[derive(Parser, Debug)]
#[command(name = "pyshop")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    PYSHOP_HOST             Bind address (default: 0.0.0.0)
    PYSHOP_PORT             Listen port (default: 8000)
    PYSHOP_DATABASE_URL     Database URL (default: sqlite:~/.pyshop/db.sqlite3)
    PYSHOP_DATA_DIR         Data directory for the default database
    PYSHOP_LOG_LEVEL        Log level (default: info)
    PYSHOP_LOG_FORMAT       Log format: pretty | json (default: pretty)
    PYSHOP_LOG_DIR          Write daily rotated log files to this directory
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations and exit
    Migrate(migrate::MigrateArgs),
    /// List applied database migrations
    #[command(name = "showmigrations")]
    ShowMigrations(migrate::MigrateArgs),
}
