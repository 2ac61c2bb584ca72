// Cloudinary upload client
//
// Implements the BlobStore trait from brocante-core against the
// Cloudinary image-upload API. Uploads are signed (SHA-256 over the
// sorted parameter string plus the API secret); the file travels as a
// base64 data URI form field.

use anyhow::{Context, Result};
use async_trait::async_trait;
use brocante_core::BlobStore;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Cloudinary blob-store client
pub struct CloudinaryClient {
    client: Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryClient {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            client: Client::new(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    /// Create a new Cloudinary client
    /// Requires CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and
    /// CLOUDINARY_API_SECRET environment variables
    pub fn from_env() -> Result<Self> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME")
            .context("CLOUDINARY_CLOUD_NAME environment variable not set")?;
        let api_key = std::env::var("CLOUDINARY_API_KEY")
            .context("CLOUDINARY_API_KEY environment variable not set")?;
        let api_secret = std::env::var("CLOUDINARY_API_SECRET")
            .context("CLOUDINARY_API_SECRET environment variable not set")?;
        Ok(Self::new(cloud_name, api_key, api_secret))
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

/// Subset of the Cloudinary upload response we use
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[async_trait]
impl BlobStore for CloudinaryClient {
    async fn upload_image(&self, data_uri: &str, folder: &str) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock before Unix epoch")?
            .as_secs()
            .to_string();

        let signature = sign(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let params = [
            ("file", data_uri),
            ("api_key", &self.api_key),
            ("timestamp", &timestamp),
            ("folder", folder),
            ("signature", &signature),
        ];

        let response = self
            .client
            .post(self.upload_url())
            .form(&params)
            .send()
            .await
            .context("Failed to send Cloudinary upload request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Cloudinary upload failed with status {}: {}",
                status,
                error_text
            );
        }

        let upload: UploadResponse = response
            .json()
            .await
            .context("Failed to parse Cloudinary upload response")?;

        Ok(upload.secure_url)
    }
}

/// Cloudinary request signature: parameters sorted by name, joined as
/// `k=v` with `&`, the API secret appended, SHA-256 digest hex-encoded.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by_key(|(k, _)| *k);

    let payload = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(format!("{payload}{api_secret}").as_bytes());
    hex::encode(digest)
}
