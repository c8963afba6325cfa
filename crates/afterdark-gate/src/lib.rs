//! # afterdark-gate
//!
//! Age gating and content-rating access control for the Afterdark client.
//!
//! ## Components
//!
//! - [`RatingCatalog`]: ordered, immutable table of ratings with minimum ages
//! - [`AgeFactStore`]: durable read/write of the single age fact; a missing or
//!   corrupt record reads as "age unknown", never as an error
//! - [`AccessPolicy`]: pure allow/deny decisions; the caller supplies `now`
//! - [`ModerationClassifier`]: content flags → suggested rating, by a fixed
//!   precedence cascade
//! - [`ContentFilter`]: hides feed items the viewer may not see
//! - [`AgeGate`]: facade wiring the above from a [`GateConfig`]
//!
//! ## Example
//!
//! ```rust
//! use afterdark_gate::{AccessPolicy, RatingCatalog};
//! use afterdark_types::AgeFact;
//! use chrono::NaiveDate;
//!
//! let catalog = RatingCatalog::mpa();
//! let now = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let fact = AgeFact::declared(NaiveDate::from_ymd_opt(2007, 1, 1).unwrap());
//!
//! let decision = AccessPolicy::new().is_allowed(Some(&fact), catalog.lookup("R").unwrap(), now);
//! assert!(!decision.allowed);
//! assert_eq!(decision.shortfall(), Some(1));
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod gate;
pub mod moderation;
pub mod policy;
pub mod store;

pub use catalog::{RatingCatalog, Taxonomy, UnknownRatingPolicy};
pub use config::{CatalogConfig, GateConfig, LoggingConfig, StoreConfig};
pub use error::{GateError, GateResult, ValidationError};
pub use filter::{ContentFilter, Rated};
pub use gate::AgeGate;
pub use moderation::{ModerationClassifier, ModerationRecord};
pub use policy::AccessPolicy;
pub use store::{
    AgeFactStore, FactBackend, InMemoryBackend, JsonFileBackend, AGE_FACT_KEY,
    DEFAULT_MINIMUM_AGE_FLOOR,
};
