// Services layer for business logic
// Services own business logic and validation, calling storage directly

pub mod offer;
pub mod payment;
pub mod user;

pub use offer::OfferService;
pub use payment::PaymentService;
pub use user::UserService;
