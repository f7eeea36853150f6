mod db;
mod import;
mod models;
mod ping;
mod schema;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealsync_core::{DestinationKind, DEFAULT_SOURCE_URL};

#[derive(Parser)]
#[command(name = "mealsync")]
#[command(about = "Import TheMealDB recipes into the recipe store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch categories and every recipe a-z, and upsert them
    Import {
        /// Root of TheMealDB JSON API
        #[arg(long, env = "MEALDB_BASE_URL", default_value = DEFAULT_SOURCE_URL)]
        source_url: String,
        /// Pause after each letter, in milliseconds
        #[arg(long, env = "IMPORT_DELAY_MS", default_value_t = 500)]
        delay_ms: u64,
        /// Timeout for each request to TheMealDB, in seconds
        #[arg(long, env = "IMPORT_TIMEOUT_SECS", default_value_t = 30)]
        timeout_secs: u64,
        /// Destination store: supabase or postgres
        #[arg(long, env = "MEALSYNC_DESTINATION", default_value = "supabase")]
        destination: DestinationKind,
        /// Keep rows in memory instead of writing to the destination
        #[arg(long)]
        dry_run: bool,
    },
    /// Ping the server (GET /)
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    mealsync_core::telemetry::init_tracing("info");

    match cli.command {
        Commands::Import {
            source_url,
            delay_ms,
            timeout_secs,
            destination,
            dry_run,
        } => {
            import::run(import::ImportOptions {
                source_url,
                delay: Duration::from_millis(delay_ms),
                timeout: Duration::from_secs(timeout_secs),
                destination,
                dry_run,
            })
            .await?;
        }
        Commands::Ping { server } => {
            ping::ping(&server).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_defaults() {
        let cli = Cli::try_parse_from(["mealsync", "import"]).unwrap();
        match cli.command {
            Commands::Import {
                source_url,
                delay_ms,
                timeout_secs,
                destination,
                dry_run,
            } => {
                assert_eq!(source_url, DEFAULT_SOURCE_URL);
                assert_eq!(delay_ms, 500);
                assert_eq!(timeout_secs, 30);
                assert_eq!(destination, DestinationKind::Supabase);
                assert!(!dry_run);
            }
            Commands::Ping { .. } => panic!("expected import"),
        }
    }

    #[test]
    fn test_import_flags() {
        let cli = Cli::try_parse_from([
            "mealsync",
            "import",
            "--destination",
            "postgres",
            "--delay-ms",
            "0",
            "--timeout-secs",
            "5",
            "--dry-run",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Import {
                destination: DestinationKind::Postgres,
                delay_ms: 0,
                timeout_secs: 5,
                dry_run: true,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_destination_is_rejected() {
        assert!(Cli::try_parse_from(["mealsync", "import", "--destination", "mysql"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
