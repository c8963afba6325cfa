//! Access decision types

use serde::{Deserialize, Serialize};

/// Allow/deny result of evaluating a user's age against a rating.
///
/// A lock screen renders `required_min_age`, plus the shortfall when the age
/// is known, or a verification prompt when it is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    /// Whether the content may be shown
    pub allowed: bool,

    /// Minimum age of the evaluated rating
    pub required_min_age: u32,

    /// The user's age, absent when no age fact exists
    pub user_age: Option<u32>,
}

impl AccessDecision {
    /// Decision for a known age
    pub fn for_age(age: u32, required_min_age: u32) -> Self {
        Self {
            allowed: age >= required_min_age,
            required_min_age,
            user_age: Some(age),
        }
    }

    /// Decision when the age is unknown: only unrestricted ratings pass.
    pub fn unknown_age(required_min_age: u32) -> Self {
        Self {
            allowed: required_min_age == 0,
            required_min_age,
            user_age: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Years missing before access is granted, when the age is known.
    pub fn shortfall(&self) -> Option<u32> {
        if self.allowed {
            return None;
        }
        self.user_age
            .map(|age| self.required_min_age.saturating_sub(age))
    }

    /// Denied because no age is on record.
    pub fn needs_verification(&self) -> bool {
        !self.allowed && self.user_age.is_none()
    }
}
