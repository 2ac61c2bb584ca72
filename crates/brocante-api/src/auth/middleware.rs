// Bearer-token auth gate
//
// Applied via route_layer to the mutation routes. Resolves the
// Authorization header to exactly one account or rejects with the same
// 401 for every failure cause (no account enumeration).

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use brocante_storage::Database;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;

/// State for the auth gate
#[derive(Clone)]
pub struct AuthState {
    pub db: Arc<Database>,
}

/// Identity resolved by the auth gate, attached to the request
/// extensions for downstream handlers. Carries only the fields the
/// owner projection needs — no credential material.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: Uuid,
    pub username: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

/// Reject unless the request carries a bearer token matching exactly
/// one account. Token validity is permanent; there is no session state.
pub async fn require_account(
    State(state): State<AuthState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let account = state
        .db
        .get_account_by_token(bearer.token())
        .await
        .map_err(ApiError::Upstream)?
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(CurrentAccount {
        id: account.id,
        username: account.username,
        phone: account.phone,
        avatar_url: account.avatar_url,
    });

    Ok(next.run(request).await)
}
