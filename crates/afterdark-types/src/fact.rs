//! The persisted age fact.
//!
//! One record per user session. The JSON shape is the one the client
//! application has always written under the `age_verification` key:
//!
//! ```json
//! {
//!   "dateOfBirth": "2000-06-15",
//!   "isVerified": true,
//!   "verificationDate": "2024-06-20T18:30:00Z",
//!   "verificationLevel": "enhanced",
//!   "verificationMethod": "card"
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::age::compute_age;

/// Strength of the verification method used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationLevel {
    #[default]
    Basic,
    Enhanced,
    Premium,
}

impl VerificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationLevel::Basic => "basic",
            VerificationLevel::Enhanced => "enhanced",
            VerificationLevel::Premium => "premium",
        }
    }
}

/// How the user completed verification.
///
/// All three are self-reported forms; none of them is checked against an
/// identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
    /// Government ID upload
    Document,
    /// SMS code to a phone number
    Phone,
    /// Payment card check
    Card,
}

impl VerificationMethod {
    /// The verification level a method grants.
    pub fn level(&self) -> VerificationLevel {
        match self {
            VerificationMethod::Phone => VerificationLevel::Basic,
            VerificationMethod::Card => VerificationLevel::Enhanced,
            VerificationMethod::Document => VerificationLevel::Premium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::Document => "document",
            VerificationMethod::Phone => "phone",
            VerificationMethod::Card => "card",
        }
    }
}

/// A user's declared birth date and verification status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeFact {
    /// Declared date of birth
    #[serde(rename = "dateOfBirth", deserialize_with = "date_or_timestamp")]
    pub birth_date: NaiveDate,

    /// Whether a verification flow completed
    pub is_verified: bool,

    /// When verification completed
    #[serde(
        rename = "verificationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verified_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub verification_level: VerificationLevel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
}

impl AgeFact {
    /// An unverified fact carrying only a declared birth date.
    pub fn declared(birth_date: NaiveDate) -> Self {
        Self {
            birth_date,
            is_verified: false,
            verified_at: None,
            verification_level: VerificationLevel::Basic,
            verification_method: None,
        }
    }

    /// A fact for a completed verification flow.
    pub fn verified(
        birth_date: NaiveDate,
        method: VerificationMethod,
        verified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            birth_date,
            is_verified: true,
            verified_at: Some(verified_at),
            verification_level: method.level(),
            verification_method: Some(method),
        }
    }

    /// Override the verification level
    pub fn with_level(mut self, level: VerificationLevel) -> Self {
        self.verification_level = level;
        self
    }

    /// Age in completed years on `as_of`; negative if the birth date is later.
    pub fn age_on(&self, as_of: NaiveDate) -> i32 {
        compute_age(self.birth_date, as_of)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp and keeps the date part.
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|e| serde::de::Error::custom(format!("invalid dateOfBirth {raw:?}: {e}")))
}
