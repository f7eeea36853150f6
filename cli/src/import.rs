use std::time::Duration;

use anyhow::{Context, Result};
use mealsync_core::{
    DestinationConfig, DestinationKind, ImportOutcome, ImportReport, MealDbSource, MemoryStore,
    Pipeline, ReqwestClient, RowStore, SupabaseStore,
};
use secrecy::ExposeSecret;

use crate::db::{create_pool, PgStore};

pub struct ImportOptions {
    pub source_url: String,
    pub delay: Duration,
    pub timeout: Duration,
    pub destination: DestinationKind,
    pub dry_run: bool,
}

/// Run one full sweep and print a summary.
pub async fn run(options: ImportOptions) -> Result<()> {
    let store: Box<dyn RowStore> = if options.dry_run {
        tracing::info!("dry run: rows are kept in memory");
        Box::new(MemoryStore::new())
    } else {
        connect(options.destination)?
    };

    let client = ReqwestClient::builder()
        .timeout(options.timeout)
        .build()
        .context("Failed to create HTTP client")?;
    let source = MealDbSource::new(client, options.source_url);

    let report = Pipeline::new(source, store)
        .with_delay(options.delay)
        .run()
        .await;

    print_summary(&report);
    Ok(())
}

/// Build the destination store from the environment. Fails before any
/// request is made when configuration is missing.
fn connect(kind: DestinationKind) -> Result<Box<dyn RowStore>> {
    let config = DestinationConfig::from_env(kind)?;
    tracing::info!(destination = %kind, ?config, "connecting to destination");

    let store: Box<dyn RowStore> = match config {
        DestinationConfig::Supabase {
            url,
            service_role_key,
        } => Box::new(
            SupabaseStore::new(url.as_str(), service_role_key)
                .context("Failed to create Supabase client")?,
        ),
        DestinationConfig::Postgres { database_url } => {
            let pool = create_pool(database_url.expose_secret())
                .context("Failed to create database pool")?;
            Box::new(PgStore::new(pool))
        }
    };

    Ok(store)
}

fn describe(outcome: &ImportOutcome) -> String {
    match outcome {
        ImportOutcome::Imported { rows } => format!("{rows} saved"),
        ImportOutcome::NoData => "no data".to_string(),
        ImportOutcome::Skipped(error) => format!("skipped ({error})"),
    }
}

fn print_summary(report: &ImportReport) {
    println!();
    println!("Import Results");
    println!("==============");
    println!("Categories: {}", describe(&report.categories));
    println!("Recipes saved: {}", report.recipes_imported);

    for partition in &report.partitions {
        if let ImportOutcome::Skipped(_) = partition.outcome {
            println!(
                "  {}: {}",
                partition.partition.letter().to_ascii_uppercase(),
                describe(&partition.outcome)
            );
        }
    }

    let failed = report.failed_partitions();
    if failed.is_empty() {
        println!("All 26 letters processed.");
    } else {
        println!(
            "{} of 26 letters skipped; the next run retries them.",
            failed.len()
        );
    }
}
