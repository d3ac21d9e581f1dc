//! Freshpaw CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! fp-cli migrate admin
//!
//! # Seed development data (sample dog subscriptions)
//! fp-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with development data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fp-cli")]
#[command(author, version, about = "Freshpaw CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the database with development data
    Seed,
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run admin database migrations
    Admin,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Admin => commands::migrate::admin().await?,
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
