// Core algorithm exports
pub mod evaluator;
pub mod filters;
pub mod lifestyle;
pub mod matcher;
pub mod retriever;
pub mod scoring;

pub use evaluator::{evaluate_for_property, evaluate_for_tenant, tenant_strengths};
pub use filters::{
    is_eligible_property, is_eligible_tenant, passes_acceptance_threshold, ACCEPTANCE_THRESHOLD,
};
pub use lifestyle::lifestyle_score;
pub use matcher::{
    rank_properties_for_tenant, rank_tenants_for_property, MatchError, Matcher, DEFAULT_LIMIT,
};
pub use retriever::CandidateRetriever;
pub use scoring::{confidence_score, financial_score, income_ratio, overall_score};
