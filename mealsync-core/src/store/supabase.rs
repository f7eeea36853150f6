//! Supabase destination, spoken to through its PostgREST endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{RowStore, UpsertBatch};
use crate::error::StoreError;

/// Ask PostgREST to merge rows that collide on the conflict key and to echo
/// the persisted rows back, so they can be counted.
const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";

pub struct SupabaseStore {
    client: reqwest::Client,
    project_url: String,
    service_role_key: SecretString,
}

impl fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("project_url", &self.project_url)
            .field("service_role_key", &"REDACTED")
            .finish()
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl SupabaseStore {
    pub fn new(
        project_url: impl Into<String>,
        service_role_key: SecretString,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            project_url: project_url.into().trim_end_matches('/').to_string(),
            service_role_key,
        })
    }

    /// Build the upsert request for a batch without sending it.
    pub fn upsert_request(&self, batch: UpsertBatch<'_>) -> Result<reqwest::Request, StoreError> {
        let collection = batch.collection();
        let body = match batch {
            UpsertBatch::Categories(rows) => serde_json::to_vec(rows)?,
            UpsertBatch::Recipes(rows) => serde_json::to_vec(rows)?,
        };
        let key = self.service_role_key.expose_secret();

        let request = self
            .client
            .post(format!("{}/rest/v1/{}", self.project_url, collection))
            .query(&[("on_conflict", collection.conflict_key())])
            .header("apikey", key)
            .bearer_auth(key)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", PREFER_UPSERT)
            .body(body)
            .build()?;

        Ok(request)
    }
}

/// Best human-readable message out of an error body.
fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut message = err.message;
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                message = format!("{message} ({details})");
            }
            if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                message = format!("{message}; hint: {hint}");
            }
            message
        }
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl RowStore for SupabaseStore {
    async fn upsert(&self, batch: UpsertBatch<'_>) -> Result<usize, StoreError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let collection = batch.collection();
        let request = self.upsert_request(batch)?;

        tracing::debug!(%collection, rows = batch.len(), "supabase: upserting");
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                collection,
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let persisted: Vec<serde_json::Value> = response.json().await?;
        Ok(persisted.len())
    }
}
