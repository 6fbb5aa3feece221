use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use crate::models::{PropertyListing, TenantProfile};
use crate::services::store::{MatchStore, StoreError};

/// Fixture file layout: `{ "tenants": [...], "properties": [...] }`
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    tenants: Vec<TenantProfile>,
    #[serde(default)]
    properties: Vec<PropertyListing>,
}

/// In-memory store for local development and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tenants: Vec<TenantProfile>,
    properties: Vec<PropertyListing>,
}

impl InMemoryStore {
    pub fn new(tenants: Vec<TenantProfile>, properties: Vec<PropertyListing>) -> Self {
        Self { tenants, properties }
    }

    /// Load tenants and properties from a JSON fixture file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let fixture: Fixture = serde_json::from_str(&raw)?;

        tracing::info!(
            "Loaded fixture {} ({} tenants, {} properties)",
            path.as_ref().display(),
            fixture.tenants.len(),
            fixture.properties.len()
        );

        Ok(Self::new(fixture.tenants, fixture.properties))
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_tenant_profile(&self, user_id: &str) -> Result<TenantProfile, StoreError> {
        self.tenants
            .iter()
            .find(|t| t.user_id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::tenant_not_found(user_id))
    }

    async fn get_property_listing(&self, property_id: &str) -> Result<PropertyListing, StoreError> {
        self.properties
            .iter()
            .find(|p| p.id == property_id)
            .cloned()
            .ok_or_else(|| StoreError::property_not_found(property_id))
    }

    async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
        Ok(self.properties.iter().filter(|p| p.is_active()).cloned().collect())
    }

    async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
        Ok(self
            .tenants
            .iter()
            .filter(|t| t.profile_completed)
            .cloned()
            .collect())
    }
}
