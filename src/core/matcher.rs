use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

use crate::core::evaluator::{evaluate_for_property, evaluate_for_tenant};
use crate::core::filters::passes_acceptance_threshold;
use crate::core::retriever::CandidateRetriever;
use crate::models::{Confidence, MatchResult, MatchingStatistics, PropertyListing, TenantProfile};
use crate::services::{MatchStore, StoreError};

/// Result size when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 20;

/// Share of overall score vs. landlord confidence when ranking properties for a tenant
const TENANT_SEARCH_BLEND: (f64, f64) = (0.7, 0.3);
/// Share of overall score vs. tenant quality when ranking tenants for a property
const PROPERTY_SEARCH_BLEND: (f64, f64) = (0.6, 0.4);

/// Errors surfaced by the ranking operations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Data access failure: {0}")]
    DataAccess(#[from] StoreError),
}

impl MatchError {
    /// Split an entity lookup failure into NotFound vs. data access failure
    fn from_lookup(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => MatchError::NotFound { entity, id },
            other => MatchError::DataAccess(other),
        }
    }
}

impl MatchResult {
    /// Blend of overall score and the one-sided confidence used for ordering
    pub fn ranking_score(&self) -> f64 {
        let ((score_weight, confidence_weight), confidence) = match self.confidence {
            Confidence::LandlordConfidence(value) => (TENANT_SEARCH_BLEND, value),
            Confidence::TenantQuality(value) => (PROPERTY_SEARCH_BLEND, value),
        };
        self.match_score * score_weight + confidence * confidence_weight
    }
}

/// Rank properties for one tenant
///
/// Evaluates every candidate, drops matches at or below the acceptance threshold,
/// sorts by `0.7 * score + 0.3 * landlord confidence` and keeps `limit` entries.
pub fn rank_properties_for_tenant(
    tenant: Arc<TenantProfile>,
    properties: Vec<PropertyListing>,
    limit: usize,
) -> Vec<MatchResult> {
    let matches = properties
        .into_iter()
        .map(|property| evaluate_for_tenant(&tenant, &Arc::new(property)))
        .filter(passes_acceptance_threshold)
        .collect();

    sort_and_truncate(matches, limit)
}

/// Rank tenants for one property
///
/// Mirror of [`rank_properties_for_tenant`], sorted by
/// `0.6 * score + 0.4 * tenant quality`.
pub fn rank_tenants_for_property(
    property: Arc<PropertyListing>,
    tenants: Vec<TenantProfile>,
    limit: usize,
) -> Vec<MatchResult> {
    let matches = tenants
        .into_iter()
        .map(|tenant| evaluate_for_property(&property, &Arc::new(tenant)))
        .filter(passes_acceptance_threshold)
        .collect();

    sort_and_truncate(matches, limit)
}

fn sort_and_truncate(mut matches: Vec<MatchResult>, limit: usize) -> Vec<MatchResult> {
    // Sort by blended score (descending); stable, so ties keep store order
    matches.sort_by(|a, b| {
        b.ranking_score()
            .partial_cmp(&a.ranking_score())
            .unwrap_or(Ordering::Equal)
    });

    matches.truncate(limit);
    matches
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Load the target tenant or property
/// 2. Retrieve the candidate population
/// 3. Evaluate every candidate
/// 4. Threshold, rank and truncate
///
/// Read-only with respect to the store; nothing is cached or persisted.
#[derive(Clone)]
pub struct Matcher {
    store: Arc<dyn MatchStore>,
    retriever: CandidateRetriever,
}

impl Matcher {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self {
            retriever: CandidateRetriever::new(Arc::clone(&store)),
            store,
        }
    }

    /// Top `limit` properties for a tenant
    pub async fn matches_for_tenant(
        &self,
        tenant_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let tenant = self
            .store
            .get_tenant_profile(tenant_id)
            .await
            .map_err(MatchError::from_lookup)?;

        let properties = self.retriever.fetch_active_properties().await?;
        let candidates = properties.len();

        let matches = rank_properties_for_tenant(Arc::new(tenant), properties, limit);

        tracing::info!(
            "Ranked {} of {} properties for tenant {}",
            matches.len(),
            candidates,
            tenant_id
        );

        Ok(matches)
    }

    /// Top `limit` tenants for a property
    pub async fn matches_for_property(
        &self,
        property_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let property = self
            .store
            .get_property_listing(property_id)
            .await
            .map_err(MatchError::from_lookup)?;

        let tenants = self.retriever.fetch_completed_tenant_profiles().await?;
        let candidates = tenants.len();

        let matches = rank_tenants_for_property(Arc::new(property), tenants, limit);

        tracing::info!(
            "Ranked {} of {} tenants for property {}",
            matches.len(),
            candidates,
            property_id
        );

        Ok(matches)
    }

    /// Population summary across completed tenants and active properties
    pub async fn statistics(&self) -> Result<MatchingStatistics, MatchError> {
        let tenants = self.retriever.fetch_completed_tenant_profiles().await?;
        let properties = self.retriever.fetch_active_properties().await?;

        Ok(summarize(&tenants, properties.len()))
    }

    pub async fn health_check(&self) -> bool {
        match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Health check against {} failed: {}", self.store.name(), e);
                false
            }
        }
    }
}

fn summarize(tenants: &[TenantProfile], total_properties: usize) -> MatchingStatistics {
    let total_tenants = tenants.len();
    let count = |predicate: fn(&TenantProfile) -> bool| {
        tenants.iter().filter(|t| predicate(t)).count()
    };
    let percentage = |part: usize| -> u32 {
        if total_tenants == 0 {
            0
        } else {
            ((part as f64 / total_tenants as f64) * 100.0).round() as u32
        }
    };

    let tenants_with_guarantor = count(|t| t.guarantor_available);
    let tenants_with_income_proof = count(|t| t.income_proof_available);
    let tenants_with_references = count(|t| t.references_available);
    let potential_matches = total_tenants * total_properties;

    MatchingStatistics {
        total_active_tenants: total_tenants,
        total_active_properties: total_properties,
        potential_matches,
        tenants_with_guarantor,
        guarantor_percentage: percentage(tenants_with_guarantor),
        tenants_with_income_proof,
        income_proof_percentage: percentage(tenants_with_income_proof),
        tenants_with_references,
        references_percentage: percentage(tenants_with_references),
        estimated_high_quality_matches: (potential_matches as f64 * 0.15).round() as usize,
        average_matches_per_property: total_tenants,
        average_matches_per_tenant: total_properties,
    }
}
