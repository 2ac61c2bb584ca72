// Domain types and pure logic for the brocante marketplace
// This crate defines account/offer DTOs, the offer query builder,
// payment amount validation, and the external-collaborator seams.

pub mod account;
pub mod gateways;
pub mod offer;
pub mod payment;
pub mod query;

pub use account::*;
pub use gateways::*;
pub use offer::*;
pub use payment::*;
pub use query::*;
