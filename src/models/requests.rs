use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::matcher::DEFAULT_LIMIT;

/// Request to rank active properties for a tenant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TenantMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "tenant_id", rename = "tenantId")]
    pub tenant_id: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

/// Request to rank completed tenant profiles for a property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "property_id", rename = "propertyId")]
    pub property_id: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    DEFAULT_LIMIT as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_to_twenty() {
        let req: TenantMatchesRequest =
            serde_json::from_str(r#"{"tenantId": "t-1"}"#).unwrap();
        assert_eq!(req.limit, 20);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        let req: PropertyMatchesRequest =
            serde_json::from_str(r#"{"propertyId": "", "limit": 5}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let req: TenantMatchesRequest =
            serde_json::from_str(r#"{"tenant_id": "t-1", "limit": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
