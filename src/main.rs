use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use huurly_match::config::{Settings, StorageBackend};
use huurly_match::core::Matcher;
use huurly_match::routes::{self, matches::AppState};
use huurly_match::services::{
    InMemoryStore, MatchStore, PostgresStore, SupabaseClient, SupabaseTables,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST);
        HttpResponse::build(status).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn MatchStore>> {
    let store: Arc<dyn MatchStore> = match settings.storage.backend {
        StorageBackend::Supabase => {
            let supabase = settings.supabase.as_ref().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing [supabase] settings")
            })?;
            let defaults = SupabaseTables::default();
            let tables = SupabaseTables {
                tenant_profiles: supabase
                    .tenant_profiles_table
                    .clone()
                    .unwrap_or(defaults.tenant_profiles),
                properties: supabase.properties_table.clone().unwrap_or(defaults.properties),
            };
            let client = SupabaseClient::new(
                supabase.url.clone(),
                supabase.api_key.clone(),
                supabase.timeout_secs.unwrap_or(30),
                tables,
            )
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            Arc::new(client)
        }
        StorageBackend::Postgres => {
            let database = settings.database.as_ref().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing [database] settings")
            })?;
            let store = PostgresStore::from_settings(
                &database.url,
                database.max_connections,
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            Arc::new(store)
        }
        StorageBackend::Memory => match &settings.storage.fixture_path {
            Some(path) => Arc::new(
                InMemoryStore::from_json_file(path)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
            ),
            None => Arc::new(InMemoryStore::default()),
        },
    };

    Ok(store)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    init_logging(&settings.logging.level, &log_format);

    info!("Starting Huurly matching service...");

    let store = build_store(&settings).await.map_err(|e| {
        error!("Failed to initialize {:?} storage: {}", settings.storage.backend, e);
        e
    })?;

    info!("Storage backend initialized: {}", store.name());

    let app_state = AppState {
        matcher: Matcher::new(store),
        max_limit: settings.matching.max_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
