//! Administrative user management

mod service;

pub use service::UserAdminService;
