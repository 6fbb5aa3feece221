// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Compatibility, CompatibilityWeights, Confidence, EmploymentStatus, FurnishedPreference,
    ListingStatus, MatchResult, MatchingStatistics, PropertyListing, PropertyType, TenantProfile,
};
pub use requests::{PropertyMatchesRequest, TenantMatchesRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse};
