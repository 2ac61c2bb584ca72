// Payment gate: amount validation plus charge delegation
//
// The claimed amount is validated against the stored offer price before
// any call leaves the process. No offer state changes on success.

use brocante_core::{payment, ChargeGateway, ChargeRequest};
use brocante_storage::Database;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::payments::PaymentRequest;

const CHARGE_CURRENCY: &str = "eur";

pub struct PaymentService {
    db: Arc<Database>,
    charge: Arc<dyn ChargeGateway>,
}

impl PaymentService {
    pub fn new(db: Arc<Database>, charge: Arc<dyn ChargeGateway>) -> Self {
        Self { db, charge }
    }

    /// Validate the claimed amount against the offer price and delegate
    /// the charge. The processor's status string is returned verbatim.
    pub async fn pay(&self, req: PaymentRequest) -> ApiResult<String> {
        let offer = self
            .db
            .get_offer(req.product_id)
            .await?
            .ok_or(ApiError::NotFound("offer"))?;

        let charge_request = build_charge_request(offer.price, &offer.title, &req)?;

        let outcome = self
            .charge
            .create_charge(charge_request)
            .await
            .map_err(ApiError::Upstream)?;

        Ok(outcome.status)
    }
}

/// Gate-keeping step, pure over its inputs: refuse underpayment, convert
/// to minor units, assemble the processor request.
fn build_charge_request(
    listed_price: f64,
    offer_title: &str,
    req: &PaymentRequest,
) -> ApiResult<ChargeRequest> {
    payment::validate_claimed_amount(listed_price, req.amount)
        .map_err(|_| ApiError::Conflict("price mismatch".to_string()))?;

    let title = req.title.as_deref().unwrap_or(offer_title);

    Ok(ChargeRequest {
        amount_minor: payment::to_minor_units(req.amount),
        currency: CHARGE_CURRENCY.to_string(),
        description: format!("Paiement brocante pour : {title}"),
        source: req.token.clone(),
    })
}
