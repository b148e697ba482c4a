use std::env;

use reqwest::Client;
use serde_json::Value;

use crate::services::fallback::ProviderError;

/// REST client for the managed database/storage provider. Tables are read
/// and written through the PostgREST endpoint, files through the storage
/// endpoint.
#[derive(Clone)]
pub struct SupabaseService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseService {
    pub fn new() -> Result<Self, ProviderError> {
        let base_url = env::var("SUPABASE_URL")
            .map_err(|_| ProviderError::Unavailable("SUPABASE_URL not set".to_string()))?;
        let api_key = env::var("SUPABASE_KEY")
            .map_err(|_| ProviderError::Unavailable("SUPABASE_KEY not set".to_string()))?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return Err(ProviderError::Unavailable(
                "Supabase credentials not properly configured".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// PostgREST select. `query` holds filter pairs such as
    /// `("continent", "eq.Europe")` alongside `select` / `order` / `limit`.
    pub async fn select(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Value> = response.json().await?;
        Ok(rows)
    }

    pub async fn insert(&self, table: &str, record: &Value) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Upload an object to a storage bucket and return its public URL.
    pub async fn upload_object(
        &self,
        bucket: &str,
        object_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url, bucket, object_name
            ))
            .header("apikey", &self.api_key)
            .header("Content-Type", content_type)
            .bearer_auth(&self.api_key)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, object_name
        ))
    }
}
