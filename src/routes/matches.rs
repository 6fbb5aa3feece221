use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{MatchError, Matcher};
use crate::models::{
    ErrorResponse, HealthResponse, MatchResult, MatchesResponse, PropertyMatchesRequest,
    TenantMatchesRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub max_limit: u16,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/tenant", web::post().to(matches_for_tenant))
        .route("/matches/property", web::post().to(matches_for_property))
        .route("/matches/statistics", web::get().to(statistics));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.matcher.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find properties for a tenant
///
/// POST /api/v1/matches/tenant
///
/// Request body:
/// ```json
/// { "tenantId": "string", "limit": 20 }
/// ```
async fn matches_for_tenant(
    state: web::Data<AppState>,
    req: web::Json<TenantMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for tenant matches request: {:?}", errors);
        return validation_error(errors);
    }

    let limit = req.limit.min(state.max_limit) as usize;
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(
        "[{}] Finding properties for tenant: {}, limit: {}",
        request_id,
        req.tenant_id,
        limit
    );

    let result = state.matcher.matches_for_tenant(&req.tenant_id, limit).await;
    respond(request_id, result)
}

/// Find tenants for a property
///
/// POST /api/v1/matches/property
///
/// Request body:
/// ```json
/// { "propertyId": "string", "limit": 20 }
/// ```
async fn matches_for_property(
    state: web::Data<AppState>,
    req: web::Json<PropertyMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for property matches request: {:?}", errors);
        return validation_error(errors);
    }

    let limit = req.limit.min(state.max_limit) as usize;
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(
        "[{}] Finding tenants for property: {}, limit: {}",
        request_id,
        req.property_id,
        limit
    );

    let result = state
        .matcher
        .matches_for_property(&req.property_id, limit)
        .await;
    respond(request_id, result)
}

/// Population statistics for the matching dashboards
///
/// GET /api/v1/matches/statistics
async fn statistics(state: web::Data<AppState>) -> impl Responder {
    match state.matcher.statistics().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(e),
    }
}

fn respond(request_id: String, result: Result<Vec<MatchResult>, MatchError>) -> HttpResponse {
    match result {
        Ok(matches) => {
            tracing::info!("[{}] Returning {} matches", request_id, matches.len());
            HttpResponse::Ok().json(MatchesResponse {
                request_id,
                total_results: matches.len(),
                matches,
            })
        }
        Err(e) => {
            tracing::error!("[{}] Matching failed: {}", request_id, e);
            error_response(e)
        }
    }
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn error_response(err: MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound { .. } => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        MatchError::DataAccess(_) => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Data access failure".to_string(),
            message: "Matching data is temporarily unavailable, please try again".to_string(),
            status_code: 503,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingStatus, PropertyListing, TenantProfile};
    use crate::services::InMemoryStore;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    fn create_state() -> AppState {
        let tenant = TenantProfile {
            user_id: "t-1".to_string(),
            profile_completed: true,
            max_budget: Some(2000.0),
            total_guaranteed_income: Some(5000.0),
            preferred_city: Some("Amsterdam".to_string()),
            ..TenantProfile::default()
        };
        let properties = (0..5)
            .map(|i| PropertyListing {
                id: format!("p-{}", i),
                rent_amount: 1200.0 + i as f64 * 100.0,
                city: Some("Amsterdam".to_string()),
                bedrooms: Some(2),
                property_type: None,
                furnished: None,
                parking_available: None,
                pets_allowed: None,
                smoking_allowed: None,
                available_from: None,
                status: ListingStatus::Active,
            })
            .collect();

        AppState {
            matcher: Matcher::new(Arc::new(InMemoryStore::new(vec![tenant], properties))),
            max_limit: 3,
        }
    }

    #[actix_web::test]
    async fn test_tenant_matches_capped_at_max_limit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/tenant")
            .set_json(serde_json::json!({ "tenantId": "t-1", "limit": 50 }))
            .to_request();
        let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.matches.len(), 3);
        assert_eq!(body.total_results, 3);
    }

    #[actix_web::test]
    async fn test_unknown_property_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/property")
            .set_json(serde_json::json!({ "propertyId": "missing" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_empty_tenant_id_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/tenant")
            .set_json(serde_json::json!({ "tenantId": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }
}
