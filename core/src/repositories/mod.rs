//! Repository interfaces for entity persistence.
//!
//! Each entity gets a trait describing its persistence contract and an
//! in-memory mock used by the service tests. The storage crate provides
//! the real implementations.

pub mod companies;
pub mod jobs;
pub mod reviews;
pub mod users;

pub use companies::{CompanyRepository, MockCompanyRepository};
pub use jobs::{JobRepository, MockJobRepository};
pub use reviews::{MockReviewRepository, ReviewRepository};
pub use users::{MockUserRepository, UserRepository};
