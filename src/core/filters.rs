use crate::models::{MatchResult, PropertyListing, TenantProfile};

/// Matches at or below this overall score are not actionable and are discarded
pub const ACCEPTANCE_THRESHOLD: f64 = 0.4;

/// Rounding slack of the weighted sum; a score this close to the threshold counts as equal
const SCORE_EPSILON: f64 = 1e-9;

/// Only active listings are candidates for a tenant search
#[inline]
pub fn is_eligible_property(property: &PropertyListing) -> bool {
    property.is_active()
}

/// Only completed profiles are candidates for a property search
#[inline]
pub fn is_eligible_tenant(profile: &TenantProfile) -> bool {
    profile.profile_completed
}

/// Keep a match only when its overall score is strictly above the threshold
#[inline]
pub fn passes_acceptance_threshold(result: &MatchResult) -> bool {
    result.match_score > ACCEPTANCE_THRESHOLD + SCORE_EPSILON
}
