//! CLI command implementations

pub mod fact;
pub mod moderation;
pub mod rating;
