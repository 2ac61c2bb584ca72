// Offer HTTP routes: publish/update/delete (bearer-gated) and
// search/get-by-id (public)

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{middleware, Extension, Json, Router};
use brocante_core::{BlobStore, Offer, SearchParams};
use brocante_storage::Database;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{require_account, AuthState, CurrentAccount};
use crate::error::ApiError;
use crate::services::OfferService;

/// App state for offer routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OfferService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, media: Option<Arc<dyn BlobStore>>) -> Self {
        Self {
            service: Arc::new(OfferService::new(db, media)),
        }
    }
}

/// Create offer routes. Mutations sit behind the auth gate; search and
/// get-by-id are public.
pub fn routes(state: AppState, auth: AuthState) -> Router {
    let protected = Router::new()
        .route("/offer/publish", post(publish_offer))
        .route("/offer/update", put(update_offer))
        .route("/offer/delete/{id}", delete(delete_offer))
        .route_layer(middleware::from_fn_with_state(auth, require_account));

    Router::new()
        .merge(protected)
        .route("/offers", get(search_offers))
        .route("/offer/{id}", get(get_offer))
        .with_state(state)
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PublishOfferRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
    pub city: Option<String>,
    /// Optional image as a base64 data URI, delegated to the blob store
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateOfferRequest {
    /// Mandatory; a missing id is a bad request, not a no-op
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Total matches for the filter, before pagination
    pub count: i64,
    pub offers: Vec<Offer>,
}

/// POST /offer/publish - Publish a new offer
#[utoipa::path(
    post,
    path = "/offer/publish",
    request_body = PublishOfferRequest,
    responses(
        (status = 201, description = "Offer published", body = Offer),
        (status = 400, description = "Missing title or invalid price"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "offers"
)]
pub async fn publish_offer(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Json(req): Json<PublishOfferRequest>,
) -> Result<(StatusCode, Json<Offer>), ApiError> {
    let offer = state.service.publish(&account, req).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

/// PUT /offer/update - Partially update an owned offer
#[utoipa::path(
    put,
    path = "/offer/update",
    request_body = UpdateOfferRequest,
    responses(
        (status = 200, description = "Offer updated", body = Offer),
        (status = 400, description = "Missing offer id"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Offer not found")
    ),
    tag = "offers"
)]
pub async fn update_offer(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Json(req): Json<UpdateOfferRequest>,
) -> Result<Json<Offer>, ApiError> {
    let offer = state.service.update(&account, req).await?;
    Ok(Json(offer))
}

/// DELETE /offer/delete/{id} - Delete an owned offer
#[utoipa::path(
    delete,
    path = "/offer/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Offer ID")
    ),
    responses(
        (status = 204, description = "Offer deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Offer not found")
    ),
    tag = "offers"
)]
pub async fn delete_offer(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&account, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /offers - Search offers
#[utoipa::path(
    get,
    path = "/offers",
    params(SearchParams),
    responses(
        (status = 200, description = "Filtered offers with pre-pagination count", body = SearchResponse)
    ),
    tag = "offers"
)]
pub async fn search_offers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (count, offers) = state.service.search(&params).await?;
    Ok(Json(SearchResponse { count, offers }))
}

/// GET /offer/{id} - Fetch an offer by ID
#[utoipa::path(
    get,
    path = "/offer/{id}",
    params(
        ("id" = Uuid, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Offer found", body = Offer),
        (status = 404, description = "Offer not found")
    ),
    tag = "offers"
)]
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Offer>, ApiError> {
    let offer = state
        .service
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("offer"))?;

    Ok(Json(offer))
}
