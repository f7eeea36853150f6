use thiserror::Error;

use crate::store::Collection;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failure talking to the recipe source API.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a raw payload could not become a row.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Identifier is not numeric: {0:?}")]
    NonNumericId(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Upsert into {collection} rejected ({status}): {message}")]
    Rejected {
        collection: Collection,
        status: u16,
        message: String,
    },

    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to encode rows: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error raised inside an importer. Never escapes it: the importer turns it
/// into `ImportOutcome::Skipped`.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Source API error: {0}")]
    Source(#[from] SourceError),

    #[error("Persistence error: {0}")]
    Store(#[from] StoreError),
}
