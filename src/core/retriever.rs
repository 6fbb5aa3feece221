use std::sync::Arc;

use crate::core::filters::{is_eligible_property, is_eligible_tenant};
use crate::models::{PropertyListing, TenantProfile};
use crate::services::{MatchStore, StoreError};

/// Fetches the candidate population for a search
///
/// Applies only the activity / completeness predicate. Store errors are returned
/// unchanged and never retried here.
#[derive(Clone)]
pub struct CandidateRetriever {
    store: Arc<dyn MatchStore>,
}

impl CandidateRetriever {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// All active property listings
    pub async fn fetch_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
        let properties: Vec<PropertyListing> = self
            .store
            .list_active_properties()
            .await?
            .into_iter()
            .filter(is_eligible_property)
            .collect();

        tracing::debug!(
            "Retrieved {} active properties from {}",
            properties.len(),
            self.store.name()
        );

        Ok(properties)
    }

    /// All tenant profiles marked complete
    pub async fn fetch_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
        let profiles: Vec<TenantProfile> = self
            .store
            .list_completed_tenant_profiles()
            .await?
            .into_iter()
            .filter(is_eligible_tenant)
            .collect();

        for profile in profiles.iter().filter(|p| !p.has_consistent_budget()) {
            tracing::warn!(
                "Tenant {} has min_budget above max_budget, scoring anyway",
                profile.user_id
            );
        }

        tracing::debug!(
            "Retrieved {} completed tenant profiles from {}",
            profiles.len(),
            self.store.name()
        );

        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingStatus;
    use async_trait::async_trait;

    /// Store that ignores the predicates so the retriever has to apply them
    struct UnfilteredStore;

    #[async_trait]
    impl MatchStore for UnfilteredStore {
        fn name(&self) -> &'static str {
            "unfiltered"
        }

        async fn get_tenant_profile(&self, user_id: &str) -> Result<TenantProfile, StoreError> {
            Err(StoreError::tenant_not_found(user_id))
        }

        async fn get_property_listing(
            &self,
            property_id: &str,
        ) -> Result<PropertyListing, StoreError> {
            Err(StoreError::property_not_found(property_id))
        }

        async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
            Ok([ListingStatus::Active, ListingStatus::Rented, ListingStatus::Active]
                .into_iter()
                .enumerate()
                .map(|(i, status)| PropertyListing {
                    id: format!("p-{}", i),
                    rent_amount: 1000.0,
                    city: None,
                    bedrooms: None,
                    property_type: None,
                    furnished: None,
                    parking_available: None,
                    pets_allowed: None,
                    smoking_allowed: None,
                    available_from: None,
                    status,
                })
                .collect())
        }

        async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
            Ok(vec![
                TenantProfile {
                    user_id: "complete".to_string(),
                    profile_completed: true,
                    min_budget: Some(2000.0),
                    max_budget: Some(1000.0),
                    ..TenantProfile::default()
                },
                TenantProfile {
                    user_id: "draft".to_string(),
                    ..TenantProfile::default()
                },
            ])
        }
    }

    struct FailingStore;

    #[async_trait]
    impl MatchStore for FailingStore {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn get_tenant_profile(&self, _: &str) -> Result<TenantProfile, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn get_property_listing(&self, _: &str) -> Result<PropertyListing, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    #[tokio::test]
    async fn test_applies_activity_predicate() {
        let retriever = CandidateRetriever::new(Arc::new(UnfilteredStore));

        let properties = retriever.fetch_active_properties().await.unwrap();
        assert_eq!(properties.len(), 2);
        assert!(properties.iter().all(|p| p.is_active()));
    }

    #[tokio::test]
    async fn test_applies_completeness_predicate() {
        let retriever = CandidateRetriever::new(Arc::new(UnfilteredStore));

        let profiles = retriever.fetch_completed_tenant_profiles().await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].user_id, "complete");
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let retriever = CandidateRetriever::new(Arc::new(FailingStore));

        assert!(matches!(
            retriever.fetch_active_properties().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            retriever.fetch_completed_tenant_profiles().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
