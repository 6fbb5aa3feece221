use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Tenant search criteria and qualifications
///
/// Field names follow the `tenant_profiles` table columns. Every optional field
/// stays optional here: the scoring rules decide how an absent value degrades a
/// dimension, nothing is coerced to zero on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantProfile {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_completed: bool,

    // Financial
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub min_budget: Option<f64>,
    #[serde(default)]
    pub total_guaranteed_income: Option<f64>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub guarantor_available: bool,
    #[serde(default)]
    pub guarantor_income: Option<f64>,
    #[serde(default)]
    pub employment_status: Option<EmploymentStatus>,

    // Documentation
    #[serde(default, deserialize_with = "null_as_default")]
    pub income_proof_available: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub references_available: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rental_history_years: u32,

    // Location and property
    #[serde(default)]
    pub preferred_city: Option<String>,
    #[serde(default)]
    pub preferred_bedrooms: Option<u32>,
    #[serde(default)]
    pub preferred_property_type: Option<PropertyType>,
    #[serde(default)]
    pub furnished_preference: Option<FurnishedPreference>,

    // Lifestyle
    #[serde(default, deserialize_with = "null_as_default")]
    pub parking_required: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_pets: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub smokes: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_from_home: bool,

    // Timing
    #[serde(default)]
    pub move_in_date_preferred: Option<NaiveDate>,
    #[serde(default)]
    pub move_in_date_earliest: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability_flexible: bool,
}

impl TenantProfile {
    /// Monthly income the landlord can rely on
    ///
    /// Prefers the combined guaranteed income (applicant, partner and guarantor) and
    /// falls back to the applicant's own monthly income. Non-positive amounts count
    /// as unknown.
    pub fn guaranteed_income(&self) -> Option<f64> {
        self.total_guaranteed_income
            .filter(|income| *income > 0.0)
            .or_else(|| self.monthly_income.filter(|income| *income > 0.0))
    }

    /// Guarantor is only counted for the financial bonus when their income is known
    pub fn has_funded_guarantor(&self) -> bool {
        self.guarantor_available && self.guarantor_income.map_or(false, |income| income > 0.0)
    }

    pub fn has_permanent_contract(&self) -> bool {
        self.employment_status == Some(EmploymentStatus::PermanentContract)
    }

    /// `min_budget <= max_budget` whenever both are set
    pub fn has_consistent_budget(&self) -> bool {
        match (self.min_budget, self.max_budget) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[serde(rename = "vast_contract")]
    PermanentContract,
    #[serde(rename = "tijdelijk_contract")]
    TemporaryContract,
    #[serde(other)]
    Other,
}

impl EmploymentStatus {
    /// Parse a raw database value; unknown values map to `Other`
    pub fn from_db(value: &str) -> Self {
        match value {
            "vast_contract" => Self::PermanentContract,
            "tijdelijk_contract" => Self::TemporaryContract,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FurnishedPreference {
    #[serde(rename = "gemeubileerd")]
    Furnished,
    #[serde(rename = "ongemeubileerd")]
    Unfurnished,
    #[serde(rename = "geen_voorkeur")]
    NoPreference,
}

impl FurnishedPreference {
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "gemeubileerd" => Some(Self::Furnished),
            "ongemeubileerd" => Some(Self::Unfurnished),
            "geen_voorkeur" => Some(Self::NoPreference),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[serde(rename = "appartement")]
    Apartment,
    #[serde(rename = "huis")]
    House,
    Studio,
    #[serde(rename = "kamer")]
    Room,
    Penthouse,
    #[serde(rename = "benedenwoning")]
    GroundFloor,
    #[serde(other)]
    Other,
}

impl PropertyType {
    pub fn from_db(value: &str) -> Self {
        match value {
            "appartement" => Self::Apartment,
            "huis" => Self::House,
            "studio" => Self::Studio,
            "kamer" => Self::Room,
            "penthouse" => Self::Penthouse,
            "benedenwoning" => Self::GroundFloor,
            _ => Self::Other,
        }
    }

    /// Human-readable label used in match reasons
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Studio => "Studio",
            Self::Room => "Room",
            Self::Penthouse => "Penthouse",
            Self::GroundFloor => "Ground-floor flat",
            Self::Other => "Other property type",
        }
    }
}

/// A unit available to rent, as stored in the `properties` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: String,
    pub rent_amount: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub furnished: Option<bool>,
    #[serde(default)]
    pub parking_available: Option<bool>,
    #[serde(default)]
    pub pets_allowed: Option<bool>,
    #[serde(default)]
    pub smoking_allowed: Option<bool>,
    #[serde(default)]
    pub available_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ListingStatus,
}

impl PropertyListing {
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    #[default]
    Inactive,
    Rented,
    #[serde(other)]
    Other,
}

impl ListingStatus {
    pub fn from_db(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "rented" => Self::Rented,
            _ => Self::Other,
        }
    }
}

/// Per-dimension compatibility breakdown, every value in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    pub financial: f64,
    pub location: f64,
    pub lifestyle: f64,
    pub timing: f64,
    pub documentation: f64,
}

/// Fixed weights of the five compatibility dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityWeights {
    pub financial: f64,
    pub location: f64,
    pub lifestyle: f64,
    pub timing: f64,
    pub documentation: f64,
}

impl CompatibilityWeights {
    pub const STANDARD: Self = Self {
        financial: 0.35,
        location: 0.25,
        lifestyle: 0.20,
        timing: 0.15,
        documentation: 0.05,
    };
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One-sided confidence metric attached to a match
///
/// `LandlordConfidence` when a tenant searches properties, `TenantQuality` when a
/// landlord searches tenants for a property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Confidence {
    LandlordConfidence(f64),
    TenantQuality(f64),
}

impl Confidence {
    pub fn value(&self) -> f64 {
        match self {
            Self::LandlordConfidence(value) | Self::TenantQuality(value) => *value,
        }
    }
}

/// Result of evaluating one tenant against one property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub tenant: Arc<TenantProfile>,
    pub property: Arc<PropertyListing>,
    pub match_score: f64,
    pub compatibility: Compatibility,
    pub match_reasons: Vec<String>,
    pub risk_factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    pub confidence: Confidence,
}

impl MatchResult {
    pub fn landlord_confidence(&self) -> Option<f64> {
        match self.confidence {
            Confidence::LandlordConfidence(value) => Some(value),
            Confidence::TenantQuality(_) => None,
        }
    }

    pub fn tenant_quality(&self) -> Option<f64> {
        match self.confidence {
            Confidence::TenantQuality(value) => Some(value),
            Confidence::LandlordConfidence(_) => None,
        }
    }
}

/// Population summary for the matching dashboards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingStatistics {
    pub total_active_tenants: usize,
    pub total_active_properties: usize,
    pub potential_matches: usize,
    pub tenants_with_guarantor: usize,
    pub guarantor_percentage: u32,
    pub tenants_with_income_proof: usize,
    pub income_proof_percentage: u32,
    pub tenants_with_references: usize,
    pub references_percentage: u32,
    pub estimated_high_quality_matches: usize,
    pub average_matches_per_property: usize,
    pub average_matches_per_tenant: usize,
}

/// Treat an explicit `null` column like a missing one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
