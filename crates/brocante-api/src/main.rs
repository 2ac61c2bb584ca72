// Brocante API server
// Decision: collaborator clients (store, charge service, blob store) are
// constructed once at startup and injected into per-module states

mod auth;
mod config;
mod error;
mod offers;
mod payments;
mod services;
mod users;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use brocante_cloudinary::CloudinaryClient;
use brocante_core::{BlobStore, ChargeGateway};
use brocante_storage::Database;
use brocante_stripe::StripeClient;
use config::AppConfig;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fixed response for unmatched routes
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Page not found." })),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        users::signup,
        users::login,
        offers::publish_offer,
        offers::update_offer,
        offers::delete_offer,
        offers::search_offers,
        offers::get_offer,
        payments::create_payment,
    ),
    components(
        schemas(
            brocante_core::AuthPayload,
            brocante_core::AccountSummary,
            brocante_core::OwnerProfile,
            brocante_core::Offer,
            brocante_core::OfferDetails,
            users::SignupRequest,
            users::LoginRequest,
            offers::PublishOfferRequest,
            offers::UpdateOfferRequest,
            offers::SearchResponse,
            payments::PaymentRequest,
            payments::PaymentResponse,
        )
    ),
    tags(
        (name = "users", description = "Account signup and login"),
        (name = "offers", description = "Offer publication and search"),
        (name = "payments", description = "Amount-validated charge execution")
    ),
    info(
        title = "Brocante API",
        version = "0.1.0",
        description = "Marketplace backend: accounts, offers, search, payments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brocante_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("brocante-api starting...");

    let config = AppConfig::from_env()?;

    // Initialize database
    let db = Database::from_url(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate()
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Connected to database");
    let db = Arc::new(db);

    // Charge service client
    let charge: Arc<dyn ChargeGateway> =
        Arc::new(StripeClient::with_secret_key(config.stripe_secret_key.clone()));

    // Blob store client (optional - gracefully degrade if not configured)
    let media: Option<Arc<dyn BlobStore>> = match &config.cloudinary {
        Some(c) => {
            tracing::info!("Cloudinary uploads enabled");
            Some(Arc::new(CloudinaryClient::new(
                c.cloud_name.clone(),
                c.api_key.clone(),
                c.api_secret.clone(),
            )))
        }
        None => {
            tracing::warn!(
                "Cloudinary not configured (CLOUDINARY_* not set). Image uploads disabled."
            );
            None
        }
    };

    // Create module-specific states
    let auth_state = auth::AuthState { db: db.clone() };
    let users_state = users::AppState::new(db.clone());
    let offers_state = offers::AppState::new(db.clone(), media);
    let payments_state = payments::AppState::new(db.clone(), charge);

    let app = Router::new()
        .route("/health", get(health))
        .merge(users::routes(users_state))
        .merge(offers::routes(offers_state, auth_state))
        .merge(payments::routes(payments_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found);

    // Add CORS layer only if origins are configured
    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let app = if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ]),
        )
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
