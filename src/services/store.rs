use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PropertyListing, TenantProfile};

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StoreError {
    pub fn tenant_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "Tenant profile",
            id: id.to_string(),
        }
    }

    pub fn property_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "Property",
            id: id.to_string(),
        }
    }
}

/// Read-only access to tenant profiles and property listings
///
/// Implementations own connection handling and any retry policy; callers never
/// retry. Lookups by id return `StoreError::NotFound` for unknown ids.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    async fn get_tenant_profile(&self, user_id: &str) -> Result<TenantProfile, StoreError>;

    async fn get_property_listing(&self, property_id: &str) -> Result<PropertyListing, StoreError>;

    async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError>;

    async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError>;

    /// Cheap connectivity probe for the health endpoint
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
