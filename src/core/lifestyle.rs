use crate::core::scoring::DimensionScore;
use crate::models::{FurnishedPreference, PropertyListing, TenantProfile};

pub const RISK_PARKING_UNAVAILABLE: &str = "Parking required but not available";
pub const RISK_PETS_NOT_ALLOWED: &str = "Pets not allowed";
pub const RISK_SMOKING_NOT_ALLOWED: &str = "Smoking not allowed";

/// Lifestyle score when no check applies to the pair
const NEUTRAL_LIFESTYLE_SCORE: f64 = 0.5;

/// Outcome of one applicable lifestyle check
///
/// Counted checks contribute to the denominator. Conflicts (pets, smoking) only
/// subtract from the running score.
#[derive(Debug, Clone, PartialEq)]
pub struct LifestyleCheck {
    pub contribution: f64,
    pub counted: bool,
    pub reason: Option<String>,
    pub risk: Option<&'static str>,
}

impl LifestyleCheck {
    fn counted(contribution: f64) -> Self {
        Self {
            contribution,
            counted: true,
            reason: None,
            risk: None,
        }
    }

    fn conflict(penalty: f64, risk: &'static str) -> Self {
        Self {
            contribution: -penalty,
            counted: false,
            reason: None,
            risk: Some(risk),
        }
    }

    fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// List every lifestyle check that applies to this pair
///
/// A check is applicable only when both sides state a value for it. Order is the
/// order reasons and risks appear in the match result.
pub fn lifestyle_checks(tenant: &TenantProfile, property: &PropertyListing) -> Vec<LifestyleCheck> {
    [
        bedroom_check(tenant, property),
        property_type_check(tenant, property),
        furnished_check(tenant, property),
        parking_check(tenant, property),
        pets_check(tenant, property),
        smoking_check(tenant, property),
        work_from_home_check(tenant, property),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Lifestyle compatibility (weight 0.20)
///
/// `sum(contributions) / count(counted checks)`, floored at 0, or 0.5 when no
/// check was counted.
pub fn lifestyle_score(tenant: &TenantProfile, property: &PropertyListing) -> DimensionScore {
    fold_checks(lifestyle_checks(tenant, property))
}

pub fn fold_checks(checks: Vec<LifestyleCheck>) -> DimensionScore {
    let (total, count) = checks.iter().fold((0.0_f64, 0_u32), |(total, count), check| {
        (total + check.contribution, count + u32::from(check.counted))
    });

    let score = if count > 0 {
        (total / count as f64).clamp(0.0, 1.0)
    } else {
        NEUTRAL_LIFESTYLE_SCORE
    };

    let mut lifestyle = DimensionScore::new(score);
    for check in checks {
        lifestyle.reasons.extend(check.reason);
        lifestyle.risks.extend(check.risk.map(str::to_string));
    }
    lifestyle
}

fn bedroom_check(tenant: &TenantProfile, property: &PropertyListing) -> Option<LifestyleCheck> {
    let wanted = tenant.preferred_bedrooms?;
    let offered = property.bedrooms?;

    Some(match wanted.abs_diff(offered) {
        0 => LifestyleCheck::counted(1.0).with_reason(format!("{} bedrooms", offered)),
        1 => LifestyleCheck::counted(0.7),
        _ => LifestyleCheck::counted(0.0),
    })
}

fn property_type_check(
    tenant: &TenantProfile,
    property: &PropertyListing,
) -> Option<LifestyleCheck> {
    let wanted = tenant.preferred_property_type?;
    let offered = property.property_type?;

    Some(if wanted == offered {
        LifestyleCheck::counted(1.0).with_reason(offered.label())
    } else {
        LifestyleCheck::counted(0.0)
    })
}

fn furnished_check(tenant: &TenantProfile, property: &PropertyListing) -> Option<LifestyleCheck> {
    let preference = tenant.furnished_preference?;
    let furnished = property.furnished?;

    Some(match (preference, furnished) {
        (FurnishedPreference::Furnished, true) => {
            LifestyleCheck::counted(1.0).with_reason("Furnished")
        }
        (FurnishedPreference::Unfurnished, false) => LifestyleCheck::counted(1.0),
        (FurnishedPreference::NoPreference, _) => LifestyleCheck::counted(0.8),
        _ => LifestyleCheck::counted(0.0),
    })
}

fn parking_check(tenant: &TenantProfile, property: &PropertyListing) -> Option<LifestyleCheck> {
    if !tenant.parking_required {
        return None;
    }

    Some(match property.parking_available? {
        true => LifestyleCheck::counted(1.0).with_reason("Parking available"),
        false => LifestyleCheck::conflict(0.0, RISK_PARKING_UNAVAILABLE),
    })
}

fn pets_check(tenant: &TenantProfile, property: &PropertyListing) -> Option<LifestyleCheck> {
    if !tenant.has_pets {
        return None;
    }

    Some(match property.pets_allowed? {
        true => LifestyleCheck::counted(1.0).with_reason("Pets allowed"),
        false => LifestyleCheck::conflict(0.5, RISK_PETS_NOT_ALLOWED),
    })
}

fn smoking_check(tenant: &TenantProfile, property: &PropertyListing) -> Option<LifestyleCheck> {
    if !tenant.smokes {
        return None;
    }

    Some(match property.smoking_allowed? {
        true => LifestyleCheck::counted(1.0).with_reason("Smoking allowed"),
        false => LifestyleCheck::conflict(0.3, RISK_SMOKING_NOT_ALLOWED),
    })
}

fn work_from_home_check(
    tenant: &TenantProfile,
    property: &PropertyListing,
) -> Option<LifestyleCheck> {
    if !tenant.work_from_home || property.bedrooms.map_or(true, |bedrooms| bedrooms < 2) {
        return None;
    }

    Some(LifestyleCheck::counted(0.5).with_reason("Suitable for working from home"))
}
