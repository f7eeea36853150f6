use crate::error::ImportError;
use crate::http::HttpClient;
use crate::normalize::normalize_category;
use crate::source::MealDbSource;
use crate::store::{RowStore, UpsertBatch};

use super::{dedupe_by_key, ImportOutcome};

/// Fetch every category and upsert them in one batch.
pub async fn import_categories<C, S>(source: &MealDbSource<C>, store: &S) -> ImportOutcome
where
    C: HttpClient,
    S: RowStore + ?Sized,
{
    tracing::info!("fetching categories from TheMealDB");

    match try_import_categories(source, store).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::error!(url = %source.categories_url(), %error, "category import failed");
            ImportOutcome::Skipped(error)
        }
    }
}

async fn try_import_categories<C, S>(
    source: &MealDbSource<C>,
    store: &S,
) -> Result<ImportOutcome, ImportError>
where
    C: HttpClient,
    S: RowStore + ?Sized,
{
    let Some(raw) = source.list_categories().await? else {
        tracing::warn!("source response carried no categories");
        return Ok(ImportOutcome::NoData);
    };
    tracing::info!(received = raw.len(), "received categories");

    let rows: Vec<_> = raw
        .into_iter()
        .filter_map(|raw| {
            normalize_category(raw)
                .inspect_err(|error| tracing::warn!(%error, "skipping category"))
                .ok()
        })
        .collect();
    let rows = dedupe_by_key(rows, |category| category.api_id.clone());

    let persisted = store
        .upsert(UpsertBatch::Categories(&rows))
        .await
        .inspect_err(|error| tracing::error!(%error, "failed to save categories"))?;

    tracing::info!(rows = persisted, "categories saved");
    Ok(ImportOutcome::Imported { rows: persisted })
}
