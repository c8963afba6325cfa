//! # afterdark-types
//!
//! Data model shared by the Afterdark gating core and its callers.
//!
//! ## Types
//!
//! - [`AgeFact`]: the stored record of a user's declared birth date and
//!   verification status
//! - [`Rating`] / [`RatingBand`]: a content-restriction tier with its minimum age
//! - [`ContentFlags`] / [`ContentFlag`]: content-hazard indicators set by
//!   moderation
//! - [`AccessDecision`]: allow/deny result of evaluating an age against a rating
//!
//! Age arithmetic lives in [`age`]: [`compute_age`] is calendar-accurate, so a
//! birthday only counts once the `(month, day)` of the reference date has
//! reached the birth `(month, day)`.

#![deny(unsafe_code)]

pub mod age;
pub mod decision;
pub mod fact;
pub mod flags;
pub mod rating;

pub use age::{birthday_reached, compute_age};
pub use decision::AccessDecision;
pub use fact::{AgeFact, VerificationLevel, VerificationMethod};
pub use flags::{ContentFlag, ContentFlags};
pub use rating::{Rating, RatingBand};
