//! FieldKit API composition root.

#![forbid(unsafe_code)]

mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use fieldkit_application::{FieldKitService, InputTypeRegistry};
use fieldkit_core::{AppError, TenantId};
use fieldkit_infrastructure::InMemoryDefinitionRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let default_tenant_id = match env::var("DEFAULT_TENANT_ID")
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        Some(value) => uuid::Uuid::parse_str(value.as_str())
            .map(TenantId::from_uuid)
            .map_err(|error| AppError::Validation(format!("invalid DEFAULT_TENANT_ID: {error}")))?,
        None => TenantId::new(),
    };

    let allowed_purpose_tokens = env::var("ALLOWED_PURPOSE_TOKENS")
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let dev_seed_enabled = env::var("DEV_SEED")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let repository = Arc::new(InMemoryDefinitionRepository::new());
    let fieldkit_service = FieldKitService::new(
        repository,
        InputTypeRegistry::standard(),
        allowed_purpose_tokens,
    );

    let app_state = AppState {
        fieldkit_service,
        default_tenant_id,
    };

    if dev_seed_enabled {
        dev_seed::run(&app_state.fieldkit_service, default_tenant_id).await?;
    }

    let admin_routes = Router::new()
        .route(
            "/api/forms",
            get(handlers::forms::list_forms_handler).post(handlers::forms::create_form_handler),
        )
        .route(
            "/api/forms/{purpose_token}",
            get(handlers::forms::get_form_handler)
                .put(handlers::forms::update_form_handler)
                .delete(handlers::forms::delete_form_handler),
        )
        .route(
            "/api/forms/{purpose_token}/fields",
            get(handlers::fields::list_fields_handler).post(handlers::fields::save_field_handler),
        )
        .route(
            "/api/forms/{purpose_token}/fields/{field_key}",
            get(handlers::fields::get_field_handler)
                .put(handlers::fields::update_field_handler)
                .delete(handlers::fields::delete_field_handler),
        )
        .route(
            "/api/forms/{purpose_token}/render",
            post(handlers::render::render_form_handler),
        )
        .route(
            "/api/meta/field-types",
            get(handlers::meta::field_type_options_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_tenant,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(middleware::TENANT_HEADER),
        ]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "fieldkit-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
