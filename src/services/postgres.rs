use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;

use crate::models::{
    EmploymentStatus, FurnishedPreference, ListingStatus, PropertyListing, PropertyType,
    TenantProfile,
};
use crate::services::store::{MatchStore, StoreError};

const TENANT_COLUMNS: &str = r#"
    user_id::text AS user_id,
    COALESCE(profile_completed, false) AS profile_completed,
    max_budget::float8 AS max_budget,
    min_budget::float8 AS min_budget,
    total_guaranteed_income::float8 AS total_guaranteed_income,
    monthly_income::float8 AS monthly_income,
    COALESCE(guarantor_available, false) AS guarantor_available,
    guarantor_income::float8 AS guarantor_income,
    employment_status,
    COALESCE(income_proof_available, false) AS income_proof_available,
    COALESCE(references_available, false) AS references_available,
    COALESCE(rental_history_years, 0)::int4 AS rental_history_years,
    preferred_city,
    preferred_bedrooms::int4 AS preferred_bedrooms,
    preferred_property_type,
    furnished_preference,
    COALESCE(parking_required, false) AS parking_required,
    COALESCE(has_pets, false) AS has_pets,
    COALESCE(smokes, false) AS smokes,
    COALESCE(work_from_home, false) AS work_from_home,
    move_in_date_preferred,
    move_in_date_earliest,
    COALESCE(availability_flexible, false) AS availability_flexible
"#;

const PROPERTY_COLUMNS: &str = r#"
    id::text AS id,
    rent_amount::float8 AS rent_amount,
    city,
    bedrooms::int4 AS bedrooms,
    property_type,
    furnished,
    parking_available,
    pets_allowed,
    smoking_allowed,
    available_from,
    status
"#;

/// Raw `tenant_profiles` row; enum columns are stored as text
#[derive(Debug, FromRow)]
struct TenantProfileRow {
    user_id: String,
    profile_completed: bool,
    max_budget: Option<f64>,
    min_budget: Option<f64>,
    total_guaranteed_income: Option<f64>,
    monthly_income: Option<f64>,
    guarantor_available: bool,
    guarantor_income: Option<f64>,
    employment_status: Option<String>,
    income_proof_available: bool,
    references_available: bool,
    rental_history_years: i32,
    preferred_city: Option<String>,
    preferred_bedrooms: Option<i32>,
    preferred_property_type: Option<String>,
    furnished_preference: Option<String>,
    parking_required: bool,
    has_pets: bool,
    smokes: bool,
    work_from_home: bool,
    move_in_date_preferred: Option<NaiveDate>,
    move_in_date_earliest: Option<NaiveDate>,
    availability_flexible: bool,
}

impl From<TenantProfileRow> for TenantProfile {
    fn from(row: TenantProfileRow) -> Self {
        TenantProfile {
            user_id: row.user_id,
            profile_completed: row.profile_completed,
            max_budget: row.max_budget,
            min_budget: row.min_budget,
            total_guaranteed_income: row.total_guaranteed_income,
            monthly_income: row.monthly_income,
            guarantor_available: row.guarantor_available,
            guarantor_income: row.guarantor_income,
            employment_status: row.employment_status.as_deref().map(EmploymentStatus::from_db),
            income_proof_available: row.income_proof_available,
            references_available: row.references_available,
            rental_history_years: u32::try_from(row.rental_history_years).unwrap_or(0),
            preferred_city: row.preferred_city,
            preferred_bedrooms: row.preferred_bedrooms.and_then(|b| u32::try_from(b).ok()),
            preferred_property_type: row
                .preferred_property_type
                .as_deref()
                .map(PropertyType::from_db),
            furnished_preference: row
                .furnished_preference
                .as_deref()
                .and_then(FurnishedPreference::from_db),
            parking_required: row.parking_required,
            has_pets: row.has_pets,
            smokes: row.smokes,
            work_from_home: row.work_from_home,
            move_in_date_preferred: row.move_in_date_preferred,
            move_in_date_earliest: row.move_in_date_earliest,
            availability_flexible: row.availability_flexible,
        }
    }
}

/// Raw `properties` row
#[derive(Debug, FromRow)]
struct PropertyRow {
    id: String,
    rent_amount: f64,
    city: Option<String>,
    bedrooms: Option<i32>,
    property_type: Option<String>,
    furnished: Option<bool>,
    parking_available: Option<bool>,
    pets_allowed: Option<bool>,
    smoking_allowed: Option<bool>,
    available_from: Option<NaiveDate>,
    status: Option<String>,
}

impl From<PropertyRow> for PropertyListing {
    fn from(row: PropertyRow) -> Self {
        PropertyListing {
            id: row.id,
            rent_amount: row.rent_amount,
            city: row.city,
            bedrooms: row.bedrooms.and_then(|b| u32::try_from(b).ok()),
            property_type: row.property_type.as_deref().map(PropertyType::from_db),
            furnished: row.furnished,
            parking_available: row.parking_available,
            pets_allowed: row.pets_allowed,
            smoking_allowed: row.smoking_allowed,
            available_from: row.available_from,
            status: row
                .status
                .as_deref()
                .map(ListingStatus::from_db)
                .unwrap_or_default(),
        }
    }
}

/// PostgreSQL store reading the marketplace tables directly
///
/// Only issues `SELECT` statements; schema and writes belong to the profile and
/// property management services.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }
}

#[async_trait]
impl MatchStore for PostgresStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn get_tenant_profile(&self, user_id: &str) -> Result<TenantProfile, StoreError> {
        let query = format!(
            "SELECT {} FROM tenant_profiles WHERE user_id::text = $1 LIMIT 1",
            TENANT_COLUMNS
        );

        let row: Option<TenantProfileRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TenantProfile::from)
            .ok_or_else(|| StoreError::tenant_not_found(user_id))
    }

    async fn get_property_listing(&self, property_id: &str) -> Result<PropertyListing, StoreError> {
        let query = format!(
            "SELECT {} FROM properties WHERE id::text = $1 LIMIT 1",
            PROPERTY_COLUMNS
        );

        let row: Option<PropertyRow> = sqlx::query_as(&query)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(PropertyListing::from)
            .ok_or_else(|| StoreError::property_not_found(property_id))
    }

    async fn list_active_properties(&self) -> Result<Vec<PropertyListing>, StoreError> {
        let query = format!(
            "SELECT {} FROM properties WHERE status = 'active'",
            PROPERTY_COLUMNS
        );

        let rows: Vec<PropertyRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        tracing::debug!("Fetched {} active properties", rows.len());

        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    async fn list_completed_tenant_profiles(&self) -> Result<Vec<TenantProfile>, StoreError> {
        let query = format!(
            "SELECT {} FROM tenant_profiles WHERE profile_completed = true",
            TENANT_COLUMNS
        );

        let rows: Vec<TenantProfileRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        tracing::debug!("Fetched {} completed tenant profiles", rows.len());

        Ok(rows.into_iter().map(TenantProfile::from).collect())
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
