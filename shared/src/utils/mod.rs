//! Common utility functions

pub mod slug;
pub mod validation;
