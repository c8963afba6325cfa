//! Access policy
//!
//! Pure allow/deny decisions over an optional age fact, a rating and an
//! explicit `now`. Nothing here reads a clock, so decisions are reproducible.

use afterdark_types::{AccessDecision, AgeFact, Rating};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::catalog::RatingCatalog;

/// Stateless access decision core.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn new() -> Self {
        Self
    }

    /// The user's age on `now`, if it can be known.
    ///
    /// A fact whose birth date lies after `now` describes no real age and is
    /// treated as absent.
    pub fn user_age(&self, fact: Option<&AgeFact>, now: NaiveDate) -> Option<u32> {
        let fact = fact?;
        let age = fact.age_on(now);
        if age < 0 {
            warn!(
                birth_date = %fact.birth_date,
                now = %now,
                "age fact has a birth date after the evaluation date, ignoring it"
            );
            return None;
        }
        Some(age as u32)
    }

    /// Decide whether the holder of `fact` may view content rated `rating`.
    ///
    /// Inclusive lower bound: `age == min_age` is allowed. Without a usable
    /// fact only unrestricted (`min_age == 0`) ratings pass.
    pub fn is_allowed(
        &self,
        fact: Option<&AgeFact>,
        rating: &Rating,
        now: NaiveDate,
    ) -> AccessDecision {
        let decision = match self.user_age(fact, now) {
            Some(age) => AccessDecision::for_age(age, rating.min_age),
            None => AccessDecision::unknown_age(rating.min_age),
        };

        debug!(
            rating = %rating.id,
            required = rating.min_age,
            user_age = ?decision.user_age,
            allowed = decision.allowed,
            "access decision"
        );
        decision
    }

    /// Ratings the holder of `fact` may view, ascending by minimum age.
    ///
    /// Empty when the age is unknown.
    pub fn accessible_ratings<'c>(
        &self,
        fact: Option<&AgeFact>,
        catalog: &'c RatingCatalog,
        now: NaiveDate,
    ) -> Vec<&'c Rating> {
        match self.user_age(fact, now) {
            Some(age) => catalog.accessible_ratings(age),
            None => Vec::new(),
        }
    }
}
