//! Huurly Match - tenant and property compatibility matching
//!
//! This library provides the scoring engine behind the Huurly rental marketplace
//! dashboards. It evaluates a tenant against a property on five weighted
//! dimensions, attaches reasons, risk factors and a one-sided confidence metric,
//! and ranks candidates in either direction.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{
    evaluate_for_property, evaluate_for_tenant, MatchError, Matcher, DEFAULT_LIMIT,
};
pub use models::{MatchResult, PropertyListing, TenantProfile};
pub use services::{MatchStore, StoreError};
