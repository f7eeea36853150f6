//! Client for TheMealDB's public JSON API.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::SourceError;
use crate::http::HttpClient;
use crate::types::{CategoriesEnvelope, MealsEnvelope, RawCategory, RawMeal};

/// A single lowercase ASCII letter: the unit of work of the recipe sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition(char);

impl Partition {
    pub fn new(letter: char) -> Option<Self> {
        letter.is_ascii_lowercase().then_some(Self(letter))
    }

    /// `a` through `z`, in order.
    pub fn alphabet() -> impl Iterator<Item = Partition> {
        ('a'..='z').map(Partition)
    }

    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only access to the two endpoints the import consumes.
pub struct MealDbSource<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> MealDbSource<C> {
    /// `base_url` is the API root, e.g. `https://www.themealdb.com/api/json/v1/1/`.
    /// A missing trailing slash is added.
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn categories_url(&self) -> String {
        format!("{}categories.php", self.base_url)
    }

    pub fn search_url(&self, partition: Partition) -> String {
        format!("{}search.php?f={}", self.base_url, partition)
    }

    /// Full category list. `None` when the response carries no `categories`.
    /// Entries that do not decode are skipped with a warning.
    pub async fn list_categories(&self) -> Result<Option<Vec<RawCategory>>, SourceError> {
        let envelope: CategoriesEnvelope = self.get_json(&self.categories_url()).await?;
        Ok(envelope.categories.map(|entries| {
            decode_each(entries, |error| {
                tracing::warn!(%error, "skipping undecodable category")
            })
        }))
    }

    /// Meals whose name starts with the partition's letter. `None` when the
    /// response carries no `meals`. Entries that do not decode are skipped
    /// with a warning.
    pub async fn search_by_first_letter(
        &self,
        partition: Partition,
    ) -> Result<Option<Vec<RawMeal>>, SourceError> {
        let envelope: MealsEnvelope = self.get_json(&self.search_url(partition)).await?;
        Ok(envelope.meals.map(|entries| {
            decode_each(entries, |error| {
                tracing::warn!(letter = %partition, %error, "skipping undecodable meal")
            })
        }))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let body = self.client.get_text(url).await?;
        serde_json::from_str(&body).map_err(|source| SourceError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn decode_each<T: DeserializeOwned>(
    entries: Vec<JsonValue>,
    on_error: impl Fn(&serde_json::Error),
) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).inspect_err(&on_error).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;

    const BASE: &str = "https://api.test/v1";

    #[test]
    fn test_alphabet_is_ordered_and_complete() {
        let letters: String = Partition::alphabet().map(|p| p.letter()).collect();
        assert_eq!(letters, "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_partition_rejects_non_lowercase_letters() {
        assert!(Partition::new('m').is_some());
        assert!(Partition::new('M').is_none());
        assert!(Partition::new('1').is_none());
        assert!(Partition::new('é').is_none());
    }

    #[test]
    fn test_urls_are_built_from_base() {
        let source = MealDbSource::new(MockClient::new(), BASE);
        assert_eq!(source.categories_url(), "https://api.test/v1/categories.php");
        assert_eq!(
            source.search_url(Partition::new('b').unwrap()),
            "https://api.test/v1/search.php?f=b"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let client =
            MockClient::new().with_body("https://api.test/v1/categories.php", "<html>oops</html>");
        let source = MealDbSource::new(client, BASE);

        assert!(matches!(
            source.list_categories().await,
            Err(SourceError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_null_meals_is_none() {
        let client =
            MockClient::new().with_body("https://api.test/v1/search.php?f=x", r#"{"meals":null}"#);
        let source = MealDbSource::new(client, BASE);

        let meals = source
            .search_by_first_letter(Partition::new('x').unwrap())
            .await
            .unwrap();
        assert!(meals.is_none());
    }

    #[tokio::test]
    async fn test_wrongly_typed_meal_skips_only_that_meal() {
        let client = MockClient::new().with_body(
            "https://api.test/v1/search.php?f=c",
            r#"{"meals":[
                {"idMeal":"1","strMeal":"Chili","strTags":5},
                {"idMeal":"2","strMeal":"Chowder","strTags":"Soup"}
            ]}"#,
        );
        let source = MealDbSource::new(client, BASE);

        let meals = source
            .search_by_first_letter(Partition::new('c').unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].str_meal.as_deref(), Some("Chowder"));
    }

    #[tokio::test]
    async fn test_wrongly_typed_category_skips_only_that_category() {
        let client = MockClient::new().with_body(
            "https://api.test/v1/categories.php",
            r#"{"categories":[
                {"idCategory":1,"strCategory":"Beef"},
                {"idCategory":"2","strCategory":"Chicken"}
            ]}"#,
        );
        let source = MealDbSource::new(client, BASE);

        let categories = source.list_categories().await.unwrap().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].str_category.as_deref(), Some("Chicken"));
    }
}
