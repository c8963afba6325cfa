//! Rating catalog
//!
//! An immutable, ordered table of content ratings. Construction validates the
//! table and stable-sorts it by minimum age, so ratings sharing a minimum age
//! keep their configured order (`PG` before `PG-13`, `NC-17` before `X`).

use std::collections::HashSet;

use afterdark_types::{Rating, RatingBand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GateError, GateResult};

/// Built-in rating taxonomies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    /// `G / PG / PG-13 / R / NC-17 / X`
    #[default]
    Mpa,
    /// `general / teen / mature / adult`
    Audience,
}

impl Taxonomy {
    pub fn ratings(&self) -> Vec<Rating> {
        match self {
            Taxonomy::Mpa => vec![
                Rating::new("G", 0, "General Audiences", RatingBand::General),
                Rating::new("PG", 13, "Parental Guidance Suggested", RatingBand::Parental),
                Rating::new("PG-13", 13, "Parents Strongly Cautioned", RatingBand::Caution),
                Rating::new("R", 18, "Restricted", RatingBand::Restricted),
                Rating::new("NC-17", 21, "Adults Only", RatingBand::Adult),
                Rating::new("X", 21, "Explicit", RatingBand::Adult),
            ],
            Taxonomy::Audience => vec![
                Rating::new("general", 13, "General", RatingBand::General),
                Rating::new("teen", 16, "Teen", RatingBand::Parental),
                Rating::new("mature", 18, "Mature", RatingBand::Restricted),
                Rating::new("adult", 21, "Adult", RatingBand::Adult),
            ],
        }
    }
}

/// What to do when content references a rating id the catalog lacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRatingPolicy {
    /// Surface `GateError::RatingNotFound`
    #[default]
    Reject,
    /// Log and treat the content as the lowest tier
    LowestTier,
}

/// Ordered, immutable table of ratings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatingCatalog {
    ratings: Vec<Rating>,
}

impl RatingCatalog {
    /// Build a catalog from arbitrary entries.
    ///
    /// Fails on an empty table or duplicate ids.
    pub fn new(mut ratings: Vec<Rating>) -> GateResult<Self> {
        if ratings.is_empty() {
            return Err(GateError::InvalidCatalog("catalog has no ratings".into()));
        }

        let mut seen = HashSet::new();
        for rating in &ratings {
            if !seen.insert(rating.id.as_str()) {
                return Err(GateError::InvalidCatalog(format!(
                    "duplicate rating id: {}",
                    rating.id
                )));
            }
        }

        // Vec::sort_by_key is stable
        ratings.sort_by_key(|r| r.min_age);
        Ok(Self { ratings })
    }

    pub fn from_taxonomy(taxonomy: Taxonomy) -> Self {
        let mut ratings = taxonomy.ratings();
        ratings.sort_by_key(|r| r.min_age);
        Self { ratings }
    }

    /// The canonical catalog (`Taxonomy::Mpa`).
    pub fn mpa() -> Self {
        Self::from_taxonomy(Taxonomy::Mpa)
    }

    pub fn audience() -> Self {
        Self::from_taxonomy(Taxonomy::Audience)
    }

    /// Look up a rating by id.
    pub fn lookup(&self, id: &str) -> GateResult<&Rating> {
        self.ratings
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| GateError::RatingNotFound(id.to_string()))
    }

    /// Look up a rating, applying `policy` to unknown ids.
    pub fn resolve(&self, id: &str, policy: UnknownRatingPolicy) -> GateResult<&Rating> {
        match self.lookup(id) {
            Ok(rating) => Ok(rating),
            Err(err) => match policy {
                UnknownRatingPolicy::Reject => Err(err),
                UnknownRatingPolicy::LowestTier => {
                    let lowest = self.lowest();
                    warn!(
                        rating_id = id,
                        fallback = %lowest.id,
                        "unknown rating id, falling back to lowest tier"
                    );
                    Ok(lowest)
                }
            },
        }
    }

    /// Every rating with `min_age <= age`, ascending.
    pub fn accessible_ratings(&self, age: u32) -> Vec<&Rating> {
        self.ratings.iter().filter(|r| r.min_age <= age).collect()
    }

    /// The full catalog, ascending by minimum age.
    pub fn ordered(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.iter()
    }

    /// Least restrictive rating.
    pub fn lowest(&self) -> &Rating {
        // non-empty by construction
        &self.ratings[0]
    }

    /// Most restrictive rating; the last configured among equal minimum ages.
    pub fn highest(&self) -> &Rating {
        &self.ratings[self.ratings.len() - 1]
    }

    /// First rating, in catalog order, belonging to `band`.
    pub fn first_in_band(&self, band: RatingBand) -> Option<&Rating> {
        self.ratings.iter().find(|r| r.band == band)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ratings.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl Default for RatingCatalog {
    fn default() -> Self {
        Self::mpa()
    }
}
