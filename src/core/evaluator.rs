//! Compatibility evaluation of one tenant against one property.
//!
//! Both search directions run through the same dimension assessment, so a pair
//! scores identically whichever side started the search. Only the confidence label
//! and the tenant strengths differ.

use std::sync::Arc;

use crate::core::lifestyle::lifestyle_score;
use crate::core::scoring::{
    confidence_score, documentation_score, financial_score, location_score, overall_score,
    timing_score, DimensionScore,
};
use crate::models::{
    Compatibility, CompatibilityWeights, Confidence, MatchResult, PropertyListing, TenantProfile,
};

/// Dimension scores plus the reasons and risks collected while computing them
#[derive(Debug, Clone, PartialEq)]
struct Assessment {
    compatibility: Compatibility,
    match_score: f64,
    reasons: Vec<String>,
    risks: Vec<String>,
}

fn assess(tenant: &TenantProfile, property: &PropertyListing) -> Assessment {
    let financial = financial_score(tenant, property);
    let location = location_score(tenant, property);
    let lifestyle = lifestyle_score(tenant, property);
    let timing = timing_score(tenant, property);
    let documentation = documentation_score(tenant);

    let compatibility = Compatibility {
        financial: financial.score,
        location: location.score,
        lifestyle: lifestyle.score,
        timing: timing.score,
        documentation: documentation.score,
    };
    let match_score = overall_score(&compatibility, &CompatibilityWeights::STANDARD);

    let mut reasons = Vec::new();
    let mut risks = Vec::new();
    for dimension in [financial, location, lifestyle, timing, documentation] {
        let DimensionScore {
            reasons: dimension_reasons,
            risks: dimension_risks,
            ..
        } = dimension;
        reasons.extend(dimension_reasons);
        risks.extend(dimension_risks);
    }

    Assessment {
        compatibility,
        match_score,
        reasons,
        risks,
    }
}

/// Evaluate a property for a tenant's search, scored with landlord confidence
pub fn evaluate_for_tenant(
    tenant: &Arc<TenantProfile>,
    property: &Arc<PropertyListing>,
) -> MatchResult {
    let assessment = assess(tenant, property);
    let landlord_confidence = confidence_score(tenant, assessment.risks.len());

    MatchResult {
        tenant: Arc::clone(tenant),
        property: Arc::clone(property),
        match_score: assessment.match_score,
        compatibility: assessment.compatibility,
        match_reasons: assessment.reasons,
        risk_factors: assessment.risks,
        strengths: Vec::new(),
        confidence: Confidence::LandlordConfidence(landlord_confidence),
    }
}

/// Evaluate a tenant for a property's search, scored with tenant quality
pub fn evaluate_for_property(
    property: &Arc<PropertyListing>,
    tenant: &Arc<TenantProfile>,
) -> MatchResult {
    let assessment = assess(tenant, property);
    let tenant_quality = confidence_score(tenant, assessment.risks.len());

    MatchResult {
        tenant: Arc::clone(tenant),
        property: Arc::clone(property),
        match_score: assessment.match_score,
        compatibility: assessment.compatibility,
        match_reasons: assessment.reasons,
        risk_factors: assessment.risks,
        strengths: tenant_strengths(tenant, property),
        confidence: Confidence::TenantQuality(tenant_quality),
    }
}

/// Tenant strengths as a landlord would read them
pub fn tenant_strengths(tenant: &TenantProfile, property: &PropertyListing) -> Vec<String> {
    let mut strengths = Vec::new();

    if tenant
        .guaranteed_income()
        .map_or(false, |income| income >= property.rent_amount * 3.0)
    {
        strengths.push("Strong financial profile".to_string());
    }
    if tenant.guarantor_available {
        strengths.push("Guarantor available".to_string());
    }
    if tenant.has_permanent_contract() {
        strengths.push("Permanent contract".to_string());
    }
    if tenant.rental_history_years >= 3 {
        strengths.push("Experienced tenant".to_string());
    }
    if tenant.references_available {
        strengths.push("References available".to_string());
    }

    strengths
}
