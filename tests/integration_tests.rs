// Integration tests for Huurly Match

use async_trait::async_trait;
use huurly_match::core::{MatchError, Matcher, ACCEPTANCE_THRESHOLD};
use huurly_match::models::{ListingStatus, PropertyListing, TenantProfile};
use huurly_match::services::{InMemoryStore, MatchStore, StoreError};
use std::io::Write;
use std::sync::Arc;

fn create_tenant(id: &str) -> TenantProfile {
    TenantProfile {
        user_id: id.to_string(),
        profile_completed: true,
        max_budget: Some(2000.0),
        total_guaranteed_income: Some(5000.0),
        preferred_city: Some("Amsterdam".to_string()),
        ..TenantProfile::default()
    }
}

fn create_property(id: &str, rent: f64, city: &str) -> PropertyListing {
    PropertyListing {
        id: id.to_string(),
        rent_amount: rent,
        city: Some(city.to_string()),
        bedrooms: Some(2),
        property_type: None,
        furnished: None,
        parking_available: None,
        pets_allowed: None,
        smoking_allowed: None,
        available_from: None,
        status: ListingStatus::Active,
    }
}

/// 30 affordable Amsterdam listings and 20 over-budget Rotterdam listings
fn create_pool() -> Vec<PropertyListing> {
    let amsterdam = (0..30).map(|i| {
        create_property(&format!("ams-{}", i), 1000.0 + i as f64 * 30.0, "Amsterdam")
    });
    let rotterdam = (0..20).map(|i| {
        create_property(&format!("rtm-{}", i), 2500.0 + i as f64 * 50.0, "Rotterdam")
    });
    amsterdam.chain(rotterdam).collect()
}

struct FailingStore;

#[async_trait]
impl MatchStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn get_tenant_profile(&self, user_id: &str) -> Result<TenantProfile, StoreError> {
        Ok(create_tenant(user_id))
    }

    async fn get_property_listing(&self, property_id: &str) -> Result<PropertyListing, StoreError> {
        Ok(create_property(property_id, 1400.0, "Amsterdam"))
    }

    async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_integration_limit_picks_top_ranked() {
    let store = InMemoryStore::new(vec![create_tenant("t-1")], create_pool());
    let matcher = Matcher::new(Arc::new(store));

    let accepted = matcher.matches_for_tenant("t-1", 100).await.unwrap();
    assert_eq!(accepted.len(), 30, "only the Amsterdam listings clear the threshold");
    assert!(accepted.iter().all(|m| m.match_score > ACCEPTANCE_THRESHOLD));

    let top = matcher.matches_for_tenant("t-1", 5).await.unwrap();
    assert_eq!(top.len(), 5);

    let lowest_kept = top
        .iter()
        .map(|m| m.ranking_score())
        .fold(f64::INFINITY, f64::min);
    for excluded in accepted.iter().skip(5) {
        assert!(lowest_kept >= excluded.ranking_score());
    }
}

#[tokio::test]
async fn test_integration_property_search() {
    let mut draft = create_tenant("draft");
    draft.profile_completed = false;

    let mut guaranteed = create_tenant("guaranteed");
    guaranteed.guarantor_available = true;
    guaranteed.guarantor_income = Some(6000.0);

    let store = InMemoryStore::new(
        vec![create_tenant("plain"), guaranteed, draft],
        vec![create_property("p-1", 1400.0, "Amsterdam")],
    );
    let matcher = Matcher::new(Arc::new(store));

    let matches = matcher.matches_for_property("p-1", 10).await.unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].tenant.user_id, "guaranteed");
    assert!(matches.iter().all(|m| m.tenant_quality().is_some()));
    assert!(matches.iter().all(|m| m.tenant.user_id != "draft"));
}

#[tokio::test]
async fn test_integration_inactive_target_property_still_ranks() {
    let mut rented = create_property("rented", 1400.0, "Amsterdam");
    rented.status = ListingStatus::Rented;

    let store = InMemoryStore::new(vec![create_tenant("t-1")], vec![rented]);
    let matcher = Matcher::new(Arc::new(store));

    assert!(matcher.matches_for_tenant("t-1", 10).await.unwrap().is_empty());
    assert_eq!(matcher.matches_for_property("rented", 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_integration_not_found() {
    let matcher = Matcher::new(Arc::new(InMemoryStore::default()));

    assert!(matches!(
        matcher.matches_for_tenant("ghost", 5).await,
        Err(MatchError::NotFound { .. })
    ));
    assert!(matches!(
        matcher.matches_for_property("ghost", 5).await,
        Err(MatchError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_integration_store_failure_is_not_empty_result() {
    let matcher = Matcher::new(Arc::new(FailingStore));

    assert!(matches!(
        matcher.matches_for_tenant("t-1", 5).await,
        Err(MatchError::DataAccess(StoreError::Unavailable(_)))
    ));
    assert!(matches!(
        matcher.matches_for_property("p-1", 5).await,
        Err(MatchError::DataAccess(_))
    ));
    assert!(matches!(matcher.statistics().await, Err(MatchError::DataAccess(_))));
}

#[tokio::test]
async fn test_integration_statistics() {
    let mut with_guarantor = create_tenant("a");
    with_guarantor.guarantor_available = true;
    with_guarantor.references_available = true;

    let store = InMemoryStore::new(
        vec![with_guarantor, create_tenant("b")],
        create_pool().into_iter().take(10).collect(),
    );
    let stats = Matcher::new(Arc::new(store)).statistics().await.unwrap();

    assert_eq!(stats.total_active_tenants, 2);
    assert_eq!(stats.total_active_properties, 10);
    assert_eq!(stats.potential_matches, 20);
    assert_eq!(stats.tenants_with_guarantor, 1);
    assert_eq!(stats.guarantor_percentage, 50);
    assert_eq!(stats.references_percentage, 50);
    assert_eq!(stats.income_proof_percentage, 0);
    assert_eq!(stats.estimated_high_quality_matches, 3);
}

#[tokio::test]
async fn test_integration_fixture_file() {
    let path = std::env::temp_dir().join(format!("huurly-fixture-{}.json", uuid::Uuid::new_v4()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
            "tenants": [{{
                "user_id": "t-1",
                "profile_completed": true,
                "max_budget": 1800,
                "total_guaranteed_income": 4500,
                "preferred_city": "Utrecht",
                "employment_status": "vast_contract",
                "furnished_preference": "geen_voorkeur",
                "move_in_date_preferred": "2026-12-01"
            }}],
            "properties": [{{
                "id": "p-1",
                "rent_amount": 1300,
                "city": "Utrecht",
                "bedrooms": 2,
                "property_type": "appartement",
                "furnished": true,
                "available_from": "2026-12-01",
                "status": "active"
            }}]
        }}"#
    )
    .unwrap();

    let store = InMemoryStore::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let matches = Matcher::new(Arc::new(store))
        .matches_for_tenant("t-1", 5)
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].compatibility.timing, 1.0);
    assert!(matches[0].match_reasons.iter().any(|r| r == "Perfect timing match"));
}
