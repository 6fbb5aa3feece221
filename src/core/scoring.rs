use crate::models::{Compatibility, CompatibilityWeights, PropertyListing, TenantProfile};

pub const RISK_RENT_ABOVE_BUDGET: &str = "Rent above maximum budget";
pub const RISK_HIGH_RENT_TO_INCOME: &str = "High rent-to-income ratio";
pub const REASON_FLEXIBLE_MOVE_IN: &str = "Flexible move-in date";

/// Financial score when the rent is above the tenant's maximum budget
const OVER_BUDGET_SCORE: f64 = 0.1;
/// Financial score when no positive income is known
///
/// Equal to the lowest ratio tier, so declaring any income never scores worse.
const UNKNOWN_INCOME_SCORE: f64 = 0.3;
/// Location score when the cities differ or either side has no city
const OTHER_CITY_SCORE: f64 = 0.2;

/// Score of a single compatibility dimension with the reasons and risks it produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionScore {
    pub score: f64,
    pub reasons: Vec<String>,
    pub risks: Vec<String>,
}

impl DimensionScore {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            ..Self::default()
        }
    }

    fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risks.push(risk.into());
        self
    }

    /// Add a bonus, capped at 1.0
    fn bonus(mut self, amount: f64, reason: impl Into<String>) -> Self {
        self.score = (self.score + amount).min(1.0);
        self.with_reason(reason)
    }

    fn clamped(mut self) -> Self {
        self.score = self.score.clamp(0.0, 1.0);
        self
    }
}

/// Rent as a share of the tenant's guaranteed monthly income
///
/// `None` when no positive income is known.
#[inline]
pub fn income_ratio(rent: f64, income: Option<f64>) -> Option<f64> {
    income.filter(|income| *income > 0.0).map(|income| rent / income)
}

/// Financial compatibility (weight 0.35)
///
/// Rent above the maximum budget scores near zero. Otherwise the rent-to-income
/// ratio picks a tier. Guarantor and income proof bonuses apply in both cases.
pub fn financial_score(tenant: &TenantProfile, property: &PropertyListing) -> DimensionScore {
    let base = match tenant.max_budget {
        Some(max_budget) if property.rent_amount > max_budget => {
            DimensionScore::new(OVER_BUDGET_SCORE).with_risk(RISK_RENT_ABOVE_BUDGET)
        }
        _ => affordability(income_ratio(property.rent_amount, tenant.guaranteed_income())),
    };

    let mut financial = base;
    if tenant.has_funded_guarantor() {
        financial = financial.bonus(0.2, "Guarantor available");
    }
    if tenant.income_proof_available {
        financial = financial.bonus(0.1, "Income proof available");
    }

    financial.clamped()
}

fn affordability(ratio: Option<f64>) -> DimensionScore {
    match ratio {
        None => DimensionScore::new(UNKNOWN_INCOME_SCORE),
        Some(r) if r <= 0.3 => {
            DimensionScore::new(1.0).with_reason("Excellent affordability (< 30% of income)")
        }
        Some(r) if r <= 0.4 => {
            DimensionScore::new(0.8).with_reason("Good affordability (< 40% of income)")
        }
        Some(r) if r <= 0.5 => DimensionScore::new(0.6).with_reason("Acceptable affordability"),
        Some(_) => DimensionScore::new(0.3).with_risk(RISK_HIGH_RENT_TO_INCOME),
    }
}

/// Location compatibility (weight 0.25)
pub fn location_score(tenant: &TenantProfile, property: &PropertyListing) -> DimensionScore {
    let preferred = tenant.preferred_city.as_deref().map(str::trim);
    let city = property.city.as_deref().map(str::trim);

    match (preferred, city) {
        (Some(preferred), Some(city))
            if !preferred.is_empty() && preferred.to_lowercase() == city.to_lowercase() =>
        {
            DimensionScore::new(1.0).with_reason("Preferred location")
        }
        _ => DimensionScore::new(OTHER_CITY_SCORE),
    }
}

/// Timing compatibility (weight 0.15)
pub fn timing_score(tenant: &TenantProfile, property: &PropertyListing) -> DimensionScore {
    let base = match (tenant.move_in_date_preferred, property.available_from) {
        (Some(preferred), Some(available)) => {
            let days_apart = preferred.signed_duration_since(available).num_days().abs();
            match days_apart {
                0..=7 => DimensionScore::new(1.0).with_reason("Perfect timing match"),
                8..=30 => DimensionScore::new(0.8).with_reason("Good timing match"),
                31..=60 => DimensionScore::new(0.6),
                _ => DimensionScore::new(0.3),
            }
        }
        _ if tenant.availability_flexible => DimensionScore::new(0.8),
        _ => DimensionScore::new(0.5),
    };

    if tenant.availability_flexible {
        base.bonus(0.2, REASON_FLEXIBLE_MOVE_IN)
    } else {
        base
    }
}

/// Documentation completeness (weight 0.05)
pub fn documentation_score(tenant: &TenantProfile) -> DimensionScore {
    let mut documentation = DimensionScore::new(0.0);

    if tenant.income_proof_available {
        documentation.score += 0.4;
    }
    if tenant.references_available {
        documentation.score += 0.3;
    }
    if tenant.rental_history_years >= 2 {
        documentation.score += 0.3;
        documentation = documentation.with_reason(format!(
            "{} years of rental history",
            tenant.rental_history_years
        ));
    }

    documentation.clamped()
}

/// Weighted combination of the five dimensions
///
/// overall = financial * 0.35 + location * 0.25 + lifestyle * 0.20
///         + timing * 0.15 + documentation * 0.05
#[inline]
pub fn overall_score(compatibility: &Compatibility, weights: &CompatibilityWeights) -> f64 {
    let total = compatibility.financial * weights.financial
        + compatibility.location * weights.location
        + compatibility.lifestyle * weights.lifestyle
        + compatibility.timing * weights.timing
        + compatibility.documentation * weights.documentation;

    total.clamp(0.0, 1.0)
}

/// One-sided confidence in the tenant, shared by landlord confidence and tenant quality
///
/// Starts at 0.5, adds fixed increments for stability signals, subtracts 0.1 per
/// recorded risk factor and clamps to [0, 1].
pub fn confidence_score(tenant: &TenantProfile, risk_count: usize) -> f64 {
    let mut confidence = 0.5;

    if tenant.guarantor_available {
        confidence += 0.2;
    }
    if tenant.income_proof_available {
        confidence += 0.1;
    }
    if tenant.has_permanent_contract() {
        confidence += 0.15;
    }
    if tenant.rental_history_years >= 3 {
        confidence += 0.1;
    }
    if tenant.references_available {
        confidence += 0.05;
    }

    confidence -= risk_count as f64 * 0.1;

    confidence.clamp(0.0, 1.0)
}
