use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Number of indexed ingredient/measure slots on a source meal.
pub const INGREDIENT_SLOTS: usize = 20;

// ============================================================================
// Source payloads (TheMealDB)
// ============================================================================

/// Envelope of `categories.php`. A missing or null array means "no data".
///
/// Entries stay undecoded so one malformed record does not fail the rest.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Option<Vec<JsonValue>>,
}

/// Envelope of `search.php`. TheMealDB answers `{"meals": null}` for letters
/// without any recipe.
#[derive(Debug, Default, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub id_category: Option<String>,
    pub str_category: Option<String>,
    pub str_category_thumb: Option<String>,
    pub str_category_description: Option<String>,
}

/// A meal as returned by the source. Everything is optional; the numbered
/// `strIngredientN` / `strMeasureN` slots land in `slots`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeal {
    /// Usually a numeric string, occasionally a bare number.
    pub id_meal: Option<JsonValue>,
    pub str_meal: Option<String>,
    pub str_category: Option<String>,
    pub str_area: Option<String>,
    pub str_instructions: Option<String>,
    pub str_meal_thumb: Option<String>,
    pub str_youtube: Option<String>,
    pub str_source: Option<String>,
    pub str_tags: Option<String>,
    #[serde(flatten)]
    pub slots: Map<String, JsonValue>,
}

impl RawMeal {
    /// Ingredient name in slot `n` (1-based), if it holds a string.
    pub fn ingredient(&self, n: usize) -> Option<&str> {
        self.slots
            .get(&format!("strIngredient{n}"))
            .and_then(JsonValue::as_str)
    }

    /// Measure in slot `n` (1-based), if it holds a string.
    pub fn measure(&self, n: usize) -> Option<&str> {
        self.slots
            .get(&format!("strMeasure{n}"))
            .and_then(JsonValue::as_str)
    }
}

// ============================================================================
// Destination rows
// ============================================================================

/// A row of the `categories` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub api_id: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    pub measure: String,
}

/// A row of the `recipes` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub api_id: i64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    pub source_url: Option<String>,
    /// Stored in the `ingredients_json` column.
    #[serde(rename = "ingredients_json")]
    pub ingredients: Vec<IngredientLine>,
    pub tags: String,
}
