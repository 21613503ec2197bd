pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockCompanyRepository;
pub use r#trait::{CompanyRepository, EARTH_RADIUS_KM};
