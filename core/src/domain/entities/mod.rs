//! Persisted entity types

pub mod company;
pub mod job;
pub mod review;
pub mod user;

pub use company::{Company, Industry, Location};
pub use job::{Job, MinimumSkill};
pub use review::Review;
pub use user::{Role, User};
