//! Review management

mod service;

pub use service::ReviewService;
