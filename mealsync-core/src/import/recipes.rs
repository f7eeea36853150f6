use crate::error::ImportError;
use crate::http::HttpClient;
use crate::normalize::normalize_meal;
use crate::source::{MealDbSource, Partition};
use crate::store::{RowStore, UpsertBatch};

use super::{dedupe_by_key, ImportOutcome};

/// Fetch the meals starting with `partition`'s letter and upsert them in one
/// batch.
pub async fn import_recipes<C, S>(
    source: &MealDbSource<C>,
    store: &S,
    partition: Partition,
) -> ImportOutcome
where
    C: HttpClient,
    S: RowStore + ?Sized,
{
    match try_import_recipes(source, store, partition).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::error!(
                letter = %partition,
                url = %source.search_url(partition),
                %error,
                "recipe import failed"
            );
            ImportOutcome::Skipped(error)
        }
    }
}

async fn try_import_recipes<C, S>(
    source: &MealDbSource<C>,
    store: &S,
    partition: Partition,
) -> Result<ImportOutcome, ImportError>
where
    C: HttpClient,
    S: RowStore + ?Sized,
{
    let Some(meals) = source.search_by_first_letter(partition).await? else {
        tracing::debug!(letter = %partition, "no meals for letter");
        return Ok(ImportOutcome::NoData);
    };

    let rows: Vec<_> = meals
        .into_iter()
        .filter_map(|meal| {
            let name = meal.str_meal.clone();
            normalize_meal(meal)
                .inspect_err(|error| {
                    tracing::warn!(letter = %partition, meal = ?name, %error, "skipping meal")
                })
                .ok()
        })
        .collect();
    let rows = dedupe_by_key(rows, |recipe| recipe.api_id);

    let persisted = store
        .upsert(UpsertBatch::Recipes(&rows))
        .await
        .inspect_err(|error| tracing::error!(letter = %partition, %error, "failed to save recipes"))?;

    tracing::info!(letter = %partition, rows = persisted, "recipes saved");
    Ok(ImportOutcome::Imported { rows: persisted })
}
