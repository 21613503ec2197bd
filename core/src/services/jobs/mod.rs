//! Job management

mod service;

pub use service::JobService;
