// Account HTTP routes: signup and login

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use brocante_core::AuthPayload;
use brocante_storage::Database;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::UserService;

/// App state for user routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UserService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(UserService::new(db)),
        }
    }
}

/// Create user routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
        .with_state(state)
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /user/signup - Create an account
#[utoipa::path(
    post,
    path = "/user/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthPayload),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthPayload>), ApiError> {
    let payload = state.service.signup(req).await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

/// POST /user/login - Verify a credential
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential verified", body = AuthPayload),
        (status = 401, description = "Unknown email or wrong password")
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthPayload>, ApiError> {
    let payload = state.service.login(req).await?;
    Ok(Json(payload))
}
