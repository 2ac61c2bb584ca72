// External collaborator seams
//
// The charge service and the blob store are injected behind these traits;
// the concrete clients live in their own crates.

use anyhow::Result;
use async_trait::async_trait;

/// A single charge to execute against the payment processor
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    /// Amount in the smallest currency unit
    pub amount_minor: i64,
    /// ISO currency code, lowercase (e.g. "eur")
    pub currency: String,
    pub description: String,
    /// Opaque payment-method token supplied by the client
    pub source: String,
}

/// Processor-reported outcome of a charge attempt
#[derive(Debug, Clone)]
pub struct ChargeOutcome {
    /// Status string reported verbatim to the caller
    pub status: String,
}

/// Executes monetary transactions. Implemented by the Stripe client;
/// tests substitute a recording mock.
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    async fn create_charge(&self, request: ChargeRequest) -> Result<ChargeOutcome>;
}

/// Stores uploaded images and returns a public URL.
/// Implemented by the Cloudinary client.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// `data_uri` is a base64 data URI; `folder` groups uploads per offer.
    async fn upload_image(&self, data_uri: &str, folder: &str) -> Result<String>;
}
