// Postgres storage layer with sqlx
//
// `Database` is the shared store handle: account and offer repositories
// plus dynamic search-query construction from an `OfferQuery`.

pub mod models;
pub mod repositories;

pub use models::*;
pub use repositories::*;
