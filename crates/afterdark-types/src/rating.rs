//! Content-rating tiers.

use serde::{Deserialize, Serialize};

/// Taxonomy-neutral restriction band of a rating.
///
/// Ordered from least to most restrictive. Moderation reasons in bands so the
/// same flag cascade works whichever rating taxonomy the catalog uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
    /// Suitable for everyone (`G`, `general`)
    General = 0,
    /// Parental guidance (`PG`, `teen`)
    Parental = 1,
    /// Strong caution (`PG-13`)
    Caution = 2,
    /// Restricted (`R`, `mature`)
    Restricted = 3,
    /// Adults only (`NC-17`, `X`, `adult`)
    Adult = 4,
}

impl RatingBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingBand::General => "general",
            RatingBand::Parental => "parental",
            RatingBand::Caution => "caution",
            RatingBand::Restricted => "restricted",
            RatingBand::Adult => "adult",
        }
    }
}

impl std::fmt::Display for RatingBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named content-restriction tier with its minimum viewer age.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Catalog identifier, e.g. `PG-13`
    pub id: String,
    /// Minimum age (inclusive) to view content with this rating
    #[serde(alias = "min_age")]
    pub min_age: u32,
    /// Display name
    pub label: String,
    pub band: RatingBand,
}

impl Rating {
    pub fn new(
        id: impl Into<String>,
        min_age: u32,
        label: impl Into<String>,
        band: RatingBand,
    ) -> Self {
        Self {
            id: id.into(),
            min_age,
            label: label.into(),
            band,
        }
    }

    /// Whether this rating can be viewed without knowing the viewer's age.
    pub fn is_unrestricted(&self) -> bool {
        self.min_age == 0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}+)", self.id, self.min_age)
    }
}
