// Offer publication, mutation and search

use brocante_core::{BlobStore, Offer, OfferDetails, OfferQuery, OwnerProfile, SearchParams};
use brocante_storage::{CreateOffer, Database, OfferRow, OfferWithOwnerRow, UpdateOffer};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::{ApiError, ApiResult};
use crate::offers::{PublishOfferRequest, UpdateOfferRequest};

pub struct OfferService {
    db: Arc<Database>,
    media: Option<Arc<dyn BlobStore>>,
}

impl OfferService {
    pub fn new(db: Arc<Database>, media: Option<Arc<dyn BlobStore>>) -> Self {
        Self { db, media }
    }

    /// Publish a new offer owned by the authenticated account.
    /// The optional picture is uploaded to the blob store under a
    /// per-offer folder before the row is inserted.
    pub async fn publish(
        &self,
        account: &CurrentAccount,
        req: PublishOfferRequest,
    ) -> ApiResult<Offer> {
        if req.title.trim().is_empty() {
            return Err(ApiError::BadRequest("title is required".to_string()));
        }
        validate_price(req.price)?;

        // Generated here so the upload folder can carry the offer id
        let id = Uuid::new_v4();

        let image_url = match (&req.picture, &self.media) {
            (Some(picture), Some(media)) => Some(
                media
                    .upload_image(picture, &format!("offers/{id}"))
                    .await
                    .map_err(ApiError::Upstream)?,
            ),
            (Some(_), None) => {
                tracing::warn!("image upload skipped: blob store not configured");
                None
            }
            (None, _) => None,
        };

        let row = self
            .db
            .create_offer(CreateOffer {
                id,
                title: req.title,
                description: req.description.unwrap_or_default(),
                price: req.price,
                details: OfferDetails {
                    brand: req.brand,
                    size: req.size,
                    condition: req.condition,
                    color: req.color,
                    city: req.city,
                },
                image_url,
                owner_id: account.id,
            })
            .await?;

        Ok(offer_from_row(row, account))
    }

    /// Partial update of title/description/price. The id is mandatory;
    /// only the owner's offers are reachable.
    pub async fn update(
        &self,
        account: &CurrentAccount,
        req: UpdateOfferRequest,
    ) -> ApiResult<Offer> {
        let id = req
            .id
            .ok_or_else(|| ApiError::BadRequest("offer id is required".to_string()))?;

        if let Some(price) = req.price {
            validate_price(price)?;
        }

        let row = self
            .db
            .update_offer(
                id,
                account.id,
                UpdateOffer {
                    title: req.title,
                    description: req.description,
                    price: req.price,
                },
            )
            .await?
            .ok_or(ApiError::NotFound("offer"))?;

        Ok(offer_from_row(row, account))
    }

    /// Delete by id, restricted to the owner
    pub async fn delete(&self, account: &CurrentAccount, id: Uuid) -> ApiResult<()> {
        if self.db.delete_offer(id, account.id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound("offer"))
        }
    }

    /// Filtered, sorted, paginated search. The count is computed from
    /// the filter alone, before the pagination window applies.
    pub async fn search(&self, params: &SearchParams) -> ApiResult<(i64, Vec<Offer>)> {
        let query = OfferQuery::from_params(params);

        let count = self.db.count_offers(&query.filter).await?;
        let rows = self.db.search_offers(&query).await?;

        Ok((count, rows.into_iter().map(offer_from_joined).collect()))
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<Option<Offer>> {
        let row = self.db.get_offer_with_owner(id).await?;
        Ok(row.map(offer_from_joined))
    }
}

fn validate_price(price: f64) -> ApiResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::BadRequest(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn offer_from_row(row: OfferRow, owner: &CurrentAccount) -> Offer {
    let details = row.details().to_display();
    Offer {
        id: row.id,
        title: row.title,
        description: row.description,
        price: row.price,
        details,
        image_url: row.image_url,
        owner: OwnerProfile {
            id: owner.id,
            username: owner.username.clone(),
            phone: owner.phone.clone(),
            avatar_url: owner.avatar_url.clone(),
        },
        created_at: row.created_at,
    }
}

fn offer_from_joined(row: OfferWithOwnerRow) -> Offer {
    let details = row.details().to_display();
    Offer {
        id: row.id,
        title: row.title,
        description: row.description,
        price: row.price,
        details,
        image_url: row.image_url,
        owner: OwnerProfile {
            id: row.owner_id,
            username: row.owner_username,
            phone: row.owner_phone,
            avatar_url: row.owner_avatar_url,
        },
        created_at: row.created_at,
    }
}
