//! Business services
//!
//! Services orchestrate repositories, the validation pass and the external
//! ports (geocoding, mail, photo storage). They are generic over the
//! repository traits so tests run them against the in-memory mocks.

pub mod aggregates;
pub mod auth;
pub mod companies;
pub mod geocode;
pub mod jobs;
pub mod mail;
pub mod populate;
pub mod reviews;
pub mod token;
pub mod users;

pub use auth::{AuthOutcome, AuthService, IdentityResolver};
pub use companies::{CompanyService, PhotoStore};
pub use geocode::Geocoder;
pub use jobs::JobService;
pub use mail::{EmailMessage, Mailer};
pub use reviews::ReviewService;
pub use token::TokenService;
pub use users::UserAdminService;
