// Account-related DTOs for the public API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Credential payload returned once at signup/login.
/// The token is the caller's bearer credential; hash and salt never
/// leave the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthPayload {
    pub id: Uuid,
    pub token: String,
    pub account: AccountSummary,
}

/// Non-sensitive account fields echoed back to the credential owner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountSummary {
    pub username: String,
    pub phone: Option<String>,
}

/// Public projection of an offer's owner.
/// Invariant: email, hash, salt and token are never part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerProfile {
    pub id: Uuid,
    pub username: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}
