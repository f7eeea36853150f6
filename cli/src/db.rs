//! Direct Postgres destination, for deployments that hand out a database
//! URL instead of the REST endpoint.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::QueryFragment;
use diesel::query_dsl::methods::ExecuteDsl;
use diesel::r2d2::{self, ConnectionManager};
use diesel::upsert::excluded;
use mealsync_core::{RowStore, StoreError, UpsertBatch};

use crate::models::{NewCategory, NewRecipe};
use crate::schema::{categories, recipes};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}

/// Upserts through diesel. Queries run on tokio's blocking pool.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F>(&self, query: F) -> Result<usize, StoreError>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<usize> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Database(e.to_string()))?;
            query(&mut conn).map_err(|e| StoreError::Database(e.to_string()))
        })
        .await
        .map_err(|e| StoreError::Database(format!("Database task failed: {e}")))?
    }
}

/// `INSERT ... ON CONFLICT (api_id) DO UPDATE` for a batch of categories.
fn upsert_categories(
    rows: &[NewCategory],
) -> impl ExecuteDsl<PgConnection> + QueryFragment<Pg> + '_ {
    diesel::insert_into(categories::table)
        .values(rows)
        .on_conflict(categories::api_id)
        .do_update()
        .set((
            categories::name.eq(excluded(categories::name)),
            categories::thumbnail_url.eq(excluded(categories::thumbnail_url)),
            categories::description.eq(excluded(categories::description)),
            categories::updated_at.eq(diesel::dsl::now),
        ))
}

/// `INSERT ... ON CONFLICT (api_id) DO UPDATE` for a batch of recipes.
fn upsert_recipes(rows: &[NewRecipe]) -> impl ExecuteDsl<PgConnection> + QueryFragment<Pg> + '_ {
    diesel::insert_into(recipes::table)
        .values(rows)
        .on_conflict(recipes::api_id)
        .do_update()
        .set((
            recipes::name.eq(excluded(recipes::name)),
            recipes::category.eq(excluded(recipes::category)),
            recipes::area.eq(excluded(recipes::area)),
            recipes::instructions.eq(excluded(recipes::instructions)),
            recipes::thumbnail_url.eq(excluded(recipes::thumbnail_url)),
            recipes::youtube_url.eq(excluded(recipes::youtube_url)),
            recipes::source_url.eq(excluded(recipes::source_url)),
            recipes::ingredients_json.eq(excluded(recipes::ingredients_json)),
            recipes::tags.eq(excluded(recipes::tags)),
            recipes::updated_at.eq(diesel::dsl::now),
        ))
}

#[async_trait]
impl RowStore for PgStore {
    async fn upsert(&self, batch: UpsertBatch<'_>) -> Result<usize, StoreError> {
        if batch.is_empty() {
            return Ok(0);
        }

        tracing::debug!(collection = %batch.collection(), rows = batch.len(), "postgres: upserting");

        match batch {
            UpsertBatch::Categories(rows) => {
                let rows: Vec<NewCategory> = rows.iter().map(NewCategory::from).collect();
                self.run_blocking(move |conn| ExecuteDsl::execute(upsert_categories(&rows), conn))
                    .await
            }
            UpsertBatch::Recipes(rows) => {
                let rows = rows
                    .iter()
                    .map(NewRecipe::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                self.run_blocking(move |conn| ExecuteDsl::execute(upsert_recipes(&rows), conn))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealsync_core::{Category, IngredientLine, Recipe};

    fn sql(statement: &impl QueryFragment<Pg>) -> String {
        diesel::debug_query::<Pg, _>(statement).to_string()
    }

    #[test]
    fn test_category_upsert_updates_every_column_on_api_id_conflict() {
        let rows = [NewCategory::from(&Category {
            api_id: "1".to_string(),
            name: "Beef".to_string(),
            thumbnail_url: None,
            description: Some("Cow".to_string()),
        })];

        let sql = sql(&upsert_categories(&rows));

        assert!(sql.starts_with(r#"INSERT INTO "categories""#), "{sql}");
        assert!(sql.contains(r#"ON CONFLICT ("api_id") DO UPDATE SET"#), "{sql}");
        for column in ["name", "thumbnail_url", "description"] {
            assert!(
                sql.contains(&format!(r#""{column}" = excluded."{column}""#)),
                "{column} not taken from excluded: {sql}"
            );
        }
        assert!(sql.contains(r#""updated_at" = CURRENT_TIMESTAMP"#), "{sql}");
        assert!(!sql.contains(r#""api_id" = excluded"#), "{sql}");
    }

    #[test]
    fn test_recipe_upsert_updates_every_column_on_api_id_conflict() {
        let recipe = Recipe {
            api_id: 52771,
            name: Some("Spicy Arrabiata Penne".to_string()),
            category: Some("Vegetarian".to_string()),
            area: Some("Italian".to_string()),
            instructions: None,
            thumbnail_url: None,
            youtube_url: None,
            source_url: None,
            ingredients: vec![IngredientLine {
                ingredient: "penne rigate".to_string(),
                measure: "1 pound".to_string(),
            }],
            tags: "Pasta,Curry".to_string(),
        };
        let rows = [NewRecipe::try_from(&recipe).unwrap()];

        let sql = sql(&upsert_recipes(&rows));

        assert!(sql.starts_with(r#"INSERT INTO "recipes""#), "{sql}");
        assert!(sql.contains(r#"ON CONFLICT ("api_id") DO UPDATE SET"#), "{sql}");
        for column in [
            "name",
            "category",
            "area",
            "instructions",
            "thumbnail_url",
            "youtube_url",
            "source_url",
            "ingredients_json",
            "tags",
        ] {
            assert!(
                sql.contains(&format!(r#""{column}" = excluded."{column}""#)),
                "{column} not taken from excluded: {sql}"
            );
        }
        assert!(sql.contains(r#""updated_at" = CURRENT_TIMESTAMP"#), "{sql}");
        assert!(!sql.contains(r#""api_id" = excluded"#), "{sql}");
    }
}
