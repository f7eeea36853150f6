//! Sequential sweep: categories once, then one partition per letter.

use std::time::Duration;

use tokio::time::Instant;

use crate::http::HttpClient;
use crate::source::{MealDbSource, Partition};
use crate::store::RowStore;

use super::{import_categories, import_recipes, ImportOutcome};

/// Pause after each partition, keeping the sweep under the source's rate
/// limit.
pub const DEFAULT_PARTITION_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct PartitionReport {
    pub partition: Partition,
    pub outcome: ImportOutcome,
}

/// What one run did.
#[derive(Debug)]
pub struct ImportReport {
    pub categories: ImportOutcome,
    /// One entry per letter, in sweep order.
    pub partitions: Vec<PartitionReport>,
    /// Sum of rows persisted across partitions.
    pub recipes_imported: usize,
}

impl ImportReport {
    pub fn failed_partitions(&self) -> Vec<Partition> {
        self.partitions
            .iter()
            .filter(|report| report.outcome.is_skipped())
            .map(|report| report.partition)
            .collect()
    }

    pub fn categories_imported(&self) -> usize {
        self.categories.imported()
    }
}

pub struct Pipeline<C, S> {
    source: MealDbSource<C>,
    store: S,
    delay: Duration,
}

impl<C, S> Pipeline<C, S>
where
    C: HttpClient,
    S: RowStore,
{
    pub fn new(source: MealDbSource<C>, store: S) -> Self {
        Self {
            source,
            store,
            delay: DEFAULT_PARTITION_DELAY,
        }
    }

    /// Override the pause applied after each partition.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn source(&self) -> &MealDbSource<C> {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the full sweep. Partitions run one at a time: each one's fetch,
    /// upsert and delay complete before the next letter starts.
    pub async fn run(&self) -> ImportReport {
        let started = Instant::now();

        let categories = import_categories(&self.source, &self.store).await;

        let mut recipes_imported = 0;
        let mut partitions = Vec::with_capacity(26);

        for partition in Partition::alphabet() {
            tracing::info!(
                letter = %partition.letter().to_ascii_uppercase(),
                "processing letter"
            );

            let outcome = import_recipes(&self.source, &self.store, partition).await;
            recipes_imported += outcome.imported();
            partitions.push(PartitionReport { partition, outcome });

            tokio::time::sleep(self.delay).await;
        }

        let report = ImportReport {
            categories,
            partitions,
            recipes_imported,
        };

        let failed_letters: Vec<String> = report
            .failed_partitions()
            .iter()
            .map(Partition::to_string)
            .collect();

        tracing::info!(
            categories = report.categories_imported(),
            recipes = report.recipes_imported,
            failed_letters = %failed_letters.join(","),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "import finished"
        );

        report
    }
}
