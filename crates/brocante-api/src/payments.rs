// Payment HTTP route

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use brocante_core::ChargeGateway;
use brocante_storage::Database;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::PaymentService;

/// App state for the payment route
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PaymentService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, charge: Arc<dyn ChargeGateway>) -> Self {
        Self {
            service: Arc::new(PaymentService::new(db, charge)),
        }
    }
}

/// Create payment routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/payment", post(create_payment))
        .with_state(state)
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Offer being purchased
    #[serde(rename = "productId")]
    pub product_id: Uuid,
    /// Client-declared amount in major currency units
    pub amount: f64,
    /// Payment-method token from the processor's frontend SDK
    pub token: String,
    /// Optional description title; defaults to the offer title
    pub title: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    /// Charge status reported verbatim by the processor
    pub status: String,
}

/// POST /payment - Validate the amount and execute the charge
#[utoipa::path(
    post,
    path = "/payment",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Charge executed", body = PaymentResponse),
        (status = 404, description = "Offer not found"),
        (status = 409, description = "Claimed amount below listed price plus margin")
    ),
    tag = "payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let status = state.service.pay(req).await?;
    Ok(Json(PaymentResponse { status }))
}
