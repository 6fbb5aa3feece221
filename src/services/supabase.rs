use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::models::{PropertyListing, TenantProfile};
use crate::services::store::{MatchStore, StoreError};

/// Supabase (PostgREST) client for the marketplace tables
///
/// Reads tenant profiles and property listings through the REST API. All calls are
/// read-only `GET`s filtered with PostgREST `eq.` operators.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub tenant_profiles: String,
    pub properties: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            tenant_profiles: "tenant_profiles".to_string(),
            properties: "properties".to_string(),
        }
    }
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        timeout_secs: u64,
        tables: SupabaseTables,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// Run a filtered select and decode the returned rows
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let query = filters
            .iter()
            .map(|(column, value)| format!("{}={}", column, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?select=*&{}", self.table_url(table), query);

        tracing::debug!("Querying Supabase: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Supabase query on {} failed: {} - {}", table, status, body);
            return Err(StoreError::Unavailable(format!(
                "Supabase returned {} for {}",
                status, table
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Body is not JSON: {}", e)))?;

        let rows = json
            .as_array()
            .ok_or_else(|| StoreError::InvalidResponse("Expected an array of rows".into()))?;

        rows.iter()
            .map(|row| {
                serde_json::from_value(row.clone()).map_err(|e| {
                    StoreError::InvalidResponse(format!("Failed to parse {} row: {}", table, e))
                })
            })
            .collect()
    }
}

#[async_trait]
impl MatchStore for SupabaseClient {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn get_tenant_profile(&self, user_id: &str) -> Result<TenantProfile, StoreError> {
        let rows: Vec<TenantProfile> = self
            .select(
                &self.tables.tenant_profiles,
                &[("user_id", format!("eq.{}", user_id)), ("limit", "1".to_string())],
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::tenant_not_found(user_id))
    }

    async fn get_property_listing(&self, property_id: &str) -> Result<PropertyListing, StoreError> {
        let rows: Vec<PropertyListing> = self
            .select(
                &self.tables.properties,
                &[("id", format!("eq.{}", property_id)), ("limit", "1".to_string())],
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::property_not_found(property_id))
    }

    async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
        let properties: Vec<PropertyListing> = self
            .select(&self.tables.properties, &[("status", "eq.active".to_string())])
            .await?;

        tracing::debug!("Fetched {} active properties", properties.len());
        Ok(properties)
    }

    async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
        let profiles: Vec<TenantProfile> = self
            .select(
                &self.tables.tenant_profiles,
                &[("profile_completed", "eq.true".to_string())],
            )
            .await?;

        tracing::debug!("Fetched {} completed tenant profiles", profiles.len());
        Ok(profiles)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(format!("{}?select=id&limit=1", self.table_url(&self.tables.properties)))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}
