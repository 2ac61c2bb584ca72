// Account signup and login

use brocante_core::{AccountSummary, AuthPayload};
use brocante_storage::{AccountRow, CreateAccount, Database};
use std::sync::Arc;

use crate::auth::credentials;
use crate::error::{ApiError, ApiResult};
use crate::users::{LoginRequest, SignupRequest};

pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create an account. A second signup with the same email fails with
    /// a conflict regardless of the other fields; the unique constraint
    /// on the email column backstops the pre-check.
    pub async fn signup(&self, req: SignupRequest) -> ApiResult<AuthPayload> {
        if req.username.trim().is_empty() || req.password.is_empty() || req.email.is_empty() {
            return Err(ApiError::BadRequest(
                "username, email and password are required".to_string(),
            ));
        }

        if self.db.get_account_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict("email already registered".to_string()));
        }

        let salt = credentials::generate_salt();
        let hash = credentials::hash_password(&req.password, &salt);
        let token = credentials::generate_token();

        let account = self
            .db
            .create_account(CreateAccount {
                email: req.email,
                username: req.username,
                phone: req.phone,
                token,
                hash,
                salt,
            })
            .await?;

        Ok(auth_payload(account))
    }

    /// Verify a credential. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub async fn login(&self, req: LoginRequest) -> ApiResult<AuthPayload> {
        let account = self
            .db
            .get_account_by_email(&req.email)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if !credentials::verify_password(&req.password, &account.salt, &account.hash) {
            return Err(ApiError::Unauthorized);
        }

        Ok(auth_payload(account))
    }
}

// The one place an account row becomes a client payload: the token is
// returned as the caller's bearer credential, hash and salt never leave.
fn auth_payload(account: AccountRow) -> AuthPayload {
    AuthPayload {
        id: account.id,
        token: account.token,
        account: AccountSummary {
            username: account.username,
            phone: account.phone,
        },
    }
}
