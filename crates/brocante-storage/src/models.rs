// Database models (internal, may differ from public DTOs)

use brocante_core::OfferDetails;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Account models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub token: String,
    pub hash: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub username: String,
    pub phone: Option<String>,
    pub token: String,
    pub hash: String,
    pub salt: String,
}

// ============================================
// Offer models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct OfferRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfferRow {
    pub fn details(&self) -> OfferDetails {
        OfferDetails {
            brand: self.brand.clone(),
            size: self.size.clone(),
            condition: self.condition.clone(),
            color: self.color.clone(),
            city: self.city.clone(),
        }
    }
}

/// Offer joined with the owner's public columns, as returned by search
/// and get-by-id. Credential columns are never selected.
#[derive(Debug, Clone, FromRow)]
pub struct OfferWithOwnerRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_phone: Option<String>,
    pub owner_avatar_url: Option<String>,
}

impl OfferWithOwnerRow {
    pub fn details(&self) -> OfferDetails {
        OfferDetails {
            brand: self.brand.clone(),
            size: self.size.clone(),
            condition: self.condition.clone(),
            color: self.color.clone(),
            city: self.city.clone(),
        }
    }
}

/// Insert input. The id is generated by the caller so the image upload
/// folder can reference it before the row exists.
#[derive(Debug, Clone)]
pub struct CreateOffer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub details: OfferDetails,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOffer {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}
