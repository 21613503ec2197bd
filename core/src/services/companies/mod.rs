//! Company management

mod photos;
mod service;

pub use photos::{MockPhotoStore, PhotoStore};
pub use service::CompanyService;
