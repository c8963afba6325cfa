//! Feed filtering by rating.

use afterdark_types::AgeFact;
use chrono::NaiveDate;
use tracing::warn;

use crate::catalog::RatingCatalog;
use crate::policy::AccessPolicy;

/// Anything that carries a content rating id.
pub trait Rated {
    fn rating_id(&self) -> &str;
}

/// Hides feed items the viewer may not see.
///
/// Items whose rating id is missing from the catalog are hidden: an unknown
/// rating says nothing about how restricted the content is.
pub struct ContentFilter<'a> {
    catalog: &'a RatingCatalog,
    policy: AccessPolicy,
}

impl<'a> ContentFilter<'a> {
    pub fn new(catalog: &'a RatingCatalog) -> Self {
        Self {
            catalog,
            policy: AccessPolicy::new(),
        }
    }

    /// Whether one item is visible to the holder of `fact`.
    pub fn is_visible<T: Rated>(&self, fact: Option<&AgeFact>, item: &T, now: NaiveDate) -> bool {
        match self.catalog.lookup(item.rating_id()) {
            Ok(rating) => self.policy.is_allowed(fact, rating, now).allowed,
            Err(e) => {
                warn!(error = %e, "hiding item with unknown rating");
                false
            }
        }
    }

    /// Visible items, in their original order.
    pub fn visible<'i, T: Rated>(
        &self,
        fact: Option<&AgeFact>,
        items: &'i [T],
        now: NaiveDate,
    ) -> Vec<&'i T> {
        items
            .iter()
            .filter(|item| self.is_visible(fact, *item, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clip {
        id: &'static str,
        rating: &'static str,
    }

    impl Rated for Clip {
        fn rating_id(&self) -> &str {
            self.rating
        }
    }

    fn feed() -> Vec<Clip> {
        vec![
            Clip { id: "a", rating: "G" },
            Clip { id: "b", rating: "R" },
            Clip { id: "c", rating: "PG-13" },
            Clip { id: "d", rating: "NC-17" },
            Clip { id: "e", rating: "TV-MA" },
        ]
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn visible_ids(fact: Option<&AgeFact>) -> Vec<&'static str> {
        let catalog = RatingCatalog::mpa();
        let items = feed();
        ContentFilter::new(&catalog)
            .visible(fact, &items, now())
            .into_iter()
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn anonymous_viewer_sees_general_only() {
        assert_eq!(visible_ids(None), vec!["a"]);
    }

    #[test]
    fn nineteen_year_old_sees_up_to_r() {
        let fact = AgeFact::declared(NaiveDate::from_ymd_opt(2005, 1, 1).unwrap());
        assert_eq!(visible_ids(Some(&fact)), vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_rating_is_always_hidden() {
        let fact = AgeFact::declared(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        let ids = visible_ids(Some(&fact));
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(!ids.contains(&"e"));
    }
}
