//! Mapping of loosely structured source payloads into destination rows.

use serde_json::Value as JsonValue;

use crate::error::NormalizeError;
use crate::types::{Category, IngredientLine, RawCategory, RawMeal, Recipe, INGREDIENT_SLOTS};

/// Build a `Category` row. Requires a non-blank id and name.
pub fn normalize_category(raw: RawCategory) -> Result<Category, NormalizeError> {
    let api_id = non_blank(raw.id_category).ok_or(NormalizeError::MissingField("idCategory"))?;
    let name = non_blank(raw.str_category).ok_or(NormalizeError::MissingField("strCategory"))?;

    Ok(Category {
        api_id,
        name,
        thumbnail_url: raw.str_category_thumb,
        description: raw.str_category_description,
    })
}

/// Build a `Recipe` row. Fails only when `idMeal` cannot be coerced to an
/// integer.
pub fn normalize_meal(raw: RawMeal) -> Result<Recipe, NormalizeError> {
    let api_id = coerce_id(raw.id_meal.as_ref())?;
    let ingredients = flatten_ingredients(&raw);

    Ok(Recipe {
        api_id,
        name: raw.str_meal,
        category: raw.str_category,
        area: raw.str_area,
        instructions: raw.str_instructions,
        thumbnail_url: raw.str_meal_thumb,
        youtube_url: raw.str_youtube,
        source_url: raw.str_source,
        ingredients,
        tags: raw.str_tags.unwrap_or_default(),
    })
}

/// Collect the non-blank ingredient slots in slot order, trimmed.
pub fn flatten_ingredients(raw: &RawMeal) -> Vec<IngredientLine> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let ingredient = raw.ingredient(slot)?.trim();
            if ingredient.is_empty() {
                return None;
            }

            Some(IngredientLine {
                ingredient: ingredient.to_string(),
                measure: raw.measure(slot).map(str::trim).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

fn coerce_id(value: Option<&JsonValue>) -> Result<i64, NormalizeError> {
    match value {
        Some(JsonValue::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(NormalizeError::MissingField("idMeal"));
            }
            trimmed
                .parse::<i64>()
                .map_err(|_| NormalizeError::NonNumericId(s.clone()))
        }
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .ok_or_else(|| NormalizeError::NonNumericId(n.to_string())),
        Some(JsonValue::Null) | None => Err(NormalizeError::MissingField("idMeal")),
        Some(other) => Err(NormalizeError::NonNumericId(other.to_string())),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meal(value: JsonValue) -> RawMeal {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_string_id_is_coerced() {
        let recipe = normalize_meal(meal(json!({ "idMeal": "52771" }))).unwrap();
        assert_eq!(recipe.api_id, 52771);
    }

    #[test]
    fn test_numeric_and_padded_ids() {
        assert_eq!(normalize_meal(meal(json!({ "idMeal": 7 }))).unwrap().api_id, 7);
        assert_eq!(
            normalize_meal(meal(json!({ "idMeal": " 42 " }))).unwrap().api_id,
            42
        );
    }

    #[test]
    fn test_bad_ids_are_rejected() {
        assert_eq!(
            normalize_meal(meal(json!({ "idMeal": "abc" }))).unwrap_err(),
            NormalizeError::NonNumericId("abc".to_string())
        );
        assert_eq!(
            normalize_meal(meal(json!({ "idMeal": 1.5 }))).unwrap_err(),
            NormalizeError::NonNumericId("1.5".to_string())
        );
        assert_eq!(
            normalize_meal(meal(json!({ "idMeal": "  " }))).unwrap_err(),
            NormalizeError::MissingField("idMeal")
        );
        assert_eq!(
            normalize_meal(meal(json!({ "strMeal": "No id" }))).unwrap_err(),
            NormalizeError::MissingField("idMeal")
        );
    }

    #[test]
    fn test_sparse_slots_keep_order_and_trim() {
        let raw = meal(json!({
            "idMeal": "1",
            "strIngredient1": " Flour ",
            "strMeasure1": " 2 cups",
            "strIngredient2": "",
            "strMeasure2": "ignored",
            "strIngredient3": "Sugar",
            "strMeasure3": null,
            "strIngredient4": "   ",
            "strIngredient7": "\tEggs\n",
            "strMeasure7": "3 ",
            "strIngredient20": null
        }));

        assert_eq!(
            flatten_ingredients(&raw),
            vec![
                IngredientLine {
                    ingredient: "Flour".to_string(),
                    measure: "2 cups".to_string()
                },
                IngredientLine {
                    ingredient: "Sugar".to_string(),
                    measure: String::new()
                },
                IngredientLine {
                    ingredient: "Eggs".to_string(),
                    measure: "3".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_slots_past_twenty_are_ignored() {
        let raw = meal(json!({
            "idMeal": "1",
            "strIngredient20": "Last",
            "strIngredient21": "Beyond"
        }));

        let lines = flatten_ingredients(&raw);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ingredient, "Last");
    }

    #[test]
    fn test_missing_tags_default_to_empty() {
        let recipe = normalize_meal(meal(json!({ "idMeal": "1", "strTags": null }))).unwrap();
        assert_eq!(recipe.tags, "");

        let recipe = normalize_meal(meal(json!({ "idMeal": "1" }))).unwrap();
        assert_eq!(recipe.tags, "");

        let recipe =
            normalize_meal(meal(json!({ "idMeal": "1", "strTags": "Pasta,Curry" }))).unwrap();
        assert_eq!(recipe.tags, "Pasta,Curry");
    }

    #[test]
    fn test_category_fields_map_through() {
        let raw: RawCategory = serde_json::from_value(json!({
            "idCategory": "1",
            "strCategory": "Beef",
            "strCategoryThumb": "x",
            "strCategoryDescription": "y"
        }))
        .unwrap();

        assert_eq!(
            normalize_category(raw).unwrap(),
            Category {
                api_id: "1".to_string(),
                name: "Beef".to_string(),
                thumbnail_url: Some("x".to_string()),
                description: Some("y".to_string()),
            }
        );
    }

    #[test]
    fn test_category_requires_id_and_name() {
        let missing_id: RawCategory =
            serde_json::from_value(json!({ "strCategory": "Beef" })).unwrap();
        assert_eq!(
            normalize_category(missing_id).unwrap_err(),
            NormalizeError::MissingField("idCategory")
        );

        let blank_name: RawCategory =
            serde_json::from_value(json!({ "idCategory": "2", "strCategory": " " })).unwrap();
        assert_eq!(
            normalize_category(blank_name).unwrap_err(),
            NormalizeError::MissingField("strCategory")
        );
    }
}
