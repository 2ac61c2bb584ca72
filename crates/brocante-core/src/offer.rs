// Offer DTOs and facet display labeling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::account::OwnerProfile;

/// A marketplace offer as presented to clients.
/// Facets are delivered display-labeled (see [`OfferDetails::to_display`]);
/// the owner is the public projection only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Offer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Ordered display-labeled facets:
    /// `[{MARQUE},{TAILLE},{ÉTAT},{COULEUR},{EMPLACEMENT}]`
    #[schema(value_type = Vec<Object>)]
    pub details: Vec<serde_json::Value>,
    pub image_url: Option<String>,
    pub owner: OwnerProfile,
    pub created_at: DateTime<Utc>,
}

/// The five facet attributes of an offer, stored by name.
/// The wire format re-labels them positionally; internally position
/// carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OfferDetails {
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
    pub city: Option<String>,
}

impl OfferDetails {
    /// Client-facing facet sequence. Order and labels are fixed:
    /// position 0 = MARQUE (brand) through position 4 = EMPLACEMENT (city).
    pub fn to_display(&self) -> Vec<serde_json::Value> {
        vec![
            json!({ "MARQUE": self.brand }),
            json!({ "TAILLE": self.size }),
            json!({ "ÉTAT": self.condition }),
            json!({ "COULEUR": self.color }),
            json!({ "EMPLACEMENT": self.city }),
        ]
    }
}
