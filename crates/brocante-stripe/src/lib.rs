// Stripe charge client
//
// Implements the ChargeGateway trait from brocante-core against the
// Stripe charges API. Amounts are already in minor units when they
// reach this crate; no retries are performed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use brocante_core::{ChargeGateway, ChargeOutcome, ChargeRequest};
use reqwest::Client;
use serde::Deserialize;

const STRIPE_CHARGES_URL: &str = "https://api.stripe.com/v1/charges";

/// Stripe charge-service client
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    /// Create a new Stripe client
    /// Requires STRIPE_SECRET_KEY environment variable
    pub fn new() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .context("STRIPE_SECRET_KEY environment variable not set")?;
        Ok(Self::with_secret_key(secret_key))
    }

    /// Create a new Stripe client with an explicit secret key
    pub fn with_secret_key(secret_key: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
        }
    }
}

/// Subset of the Stripe charge object we report back
#[derive(Debug, Deserialize)]
struct ChargeResponse {
    status: String,
}

#[async_trait]
impl ChargeGateway for StripeClient {
    async fn create_charge(&self, request: ChargeRequest) -> Result<ChargeOutcome> {
        let params = [
            ("amount", request.amount_minor.to_string()),
            ("currency", request.currency),
            ("description", request.description),
            ("source", request.source),
        ];

        let response = self
            .client
            .post(STRIPE_CHARGES_URL)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .context("Failed to send Stripe charge request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Stripe charge request failed with status {}: {}",
                status,
                error_text
            );
        }

        let charge: ChargeResponse = response
            .json()
            .await
            .context("Failed to parse Stripe charge response")?;

        Ok(ChargeOutcome {
            status: charge.status,
        })
    }
}
