use diesel::prelude::*;
use mealsync_core::{Category, Recipe};

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub api_id: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

impl From<&Category> for NewCategory {
    fn from(category: &Category) -> Self {
        Self {
            api_id: category.api_id.clone(),
            name: category.name.clone(),
            thumbnail_url: category.thumbnail_url.clone(),
            description: category.description.clone(),
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub api_id: i64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    pub source_url: Option<String>,
    pub ingredients_json: serde_json::Value,
    pub tags: String,
}

impl TryFrom<&Recipe> for NewRecipe {
    type Error = serde_json::Error;

    fn try_from(recipe: &Recipe) -> Result<Self, Self::Error> {
        Ok(Self {
            api_id: recipe.api_id,
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            area: recipe.area.clone(),
            instructions: recipe.instructions.clone(),
            thumbnail_url: recipe.thumbnail_url.clone(),
            youtube_url: recipe.youtube_url.clone(),
            source_url: recipe.source_url.clone(),
            ingredients_json: serde_json::to_value(&recipe.ingredients)?,
            tags: recipe.tags.clone(),
        })
    }
}
