pub mod config;
pub mod error;
pub mod http;
pub mod import;
pub mod normalize;
pub mod source;
pub mod store;
pub mod telemetry;
pub mod types;

pub use config::{ConfigError, DestinationConfig, DestinationKind, DEFAULT_SOURCE_URL};
pub use error::{FetchError, ImportError, NormalizeError, SourceError, StoreError};
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use import::{
    import_categories, import_recipes, ImportOutcome, ImportReport, PartitionReport, Pipeline,
    DEFAULT_PARTITION_DELAY,
};
pub use normalize::{flatten_ingredients, normalize_category, normalize_meal};
pub use source::{MealDbSource, Partition};
pub use store::{Collection, MemoryStore, RowStore, SupabaseStore, UpsertBatch};
pub use types::{Category, IngredientLine, RawCategory, RawMeal, Recipe};
