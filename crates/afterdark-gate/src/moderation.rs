//! Moderation classifier
//!
//! Maps content flags to a suggested rating through a fixed precedence
//! cascade. The cascade is a product policy, not a severity sort:
//!
//! 1. nudity → adult
//! 2. discrimination or violence → restricted
//! 3. sexual content, language or drug use → caution
//! 4. horror or gambling → parental
//! 5. anything else → general
//!
//! The first matching step decides; flags of lower steps never change the
//! outcome.

use afterdark_types::{ContentFlag, ContentFlags, Rating, RatingBand};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::RatingCatalog;

/// The cascade, highest precedence first.
const CASCADE: [(RatingBand, &[ContentFlag]); 4] = [
    (RatingBand::Adult, &[ContentFlag::Nudity]),
    (
        RatingBand::Restricted,
        &[ContentFlag::Discrimination, ContentFlag::Violence],
    ),
    (
        RatingBand::Caution,
        &[
            ContentFlag::SexualContent,
            ContentFlag::Language,
            ContentFlag::DrugUse,
        ],
    ),
    (
        RatingBand::Parental,
        &[ContentFlag::Horror, ContentFlag::Gambling],
    ),
];

/// A moderation outcome, ready for the content store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRecord {
    pub id: Uuid,
    pub content_id: String,
    pub rating_id: String,
    pub band: RatingBand,
    /// Flags of the cascade step that decided the band
    pub triggers: Vec<ContentFlag>,
    pub flags: ContentFlags,
    pub decided_at: DateTime<Utc>,
}

/// Stateless flag → rating classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModerationClassifier;

impl ModerationClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Band selected by the cascade.
    pub fn band_for(&self, flags: &ContentFlags) -> RatingBand {
        self.decide(flags).0
    }

    /// Raised flags of the cascade step that decided the band; empty when no
    /// flag is raised.
    pub fn triggers(&self, flags: &ContentFlags) -> Vec<ContentFlag> {
        self.decide(flags).1
    }

    /// Suggested rating for `flags`. Total: every input maps to a catalog entry.
    ///
    /// Picks the first catalog entry in the decided band. A catalog without
    /// that band yields the least restrictive entry of a higher band, so
    /// missing tiers never loosen a rating. Only when nothing stricter exists
    /// does it settle for the most restrictive entry of a lower band.
    pub fn suggest<'c>(&self, flags: &ContentFlags, catalog: &'c RatingCatalog) -> &'c Rating {
        let band = self.band_for(flags);

        if let Some(rating) = catalog.first_in_band(band) {
            return rating;
        }

        let stricter = catalog
            .iter()
            .filter(|r| r.band > band)
            .min_by_key(|r| (r.band, r.min_age));
        if let Some(rating) = stricter {
            return rating;
        }

        catalog
            .iter()
            .filter(|r| r.band < band)
            .last()
            .unwrap_or_else(|| catalog.highest())
    }

    /// Classify `content_id` and produce the record to persist.
    pub fn review(
        &self,
        content_id: impl Into<String>,
        flags: &ContentFlags,
        catalog: &RatingCatalog,
    ) -> ModerationRecord {
        let (band, triggers) = self.decide(flags);
        let rating = self.suggest(flags, catalog);
        let record = ModerationRecord {
            id: Uuid::new_v4(),
            content_id: content_id.into(),
            rating_id: rating.id.clone(),
            band,
            triggers,
            flags: *flags,
            decided_at: Utc::now(),
        };

        info!(
            content_id = %record.content_id,
            rating = %record.rating_id,
            band = %record.band,
            "content classified"
        );
        record
    }

    fn decide(&self, flags: &ContentFlags) -> (RatingBand, Vec<ContentFlag>) {
        for (band, step) in CASCADE {
            let raised: Vec<ContentFlag> =
                step.iter().copied().filter(|f| flags.is_set(*f)).collect();
            if !raised.is_empty() {
                return (band, raised);
            }
        }
        (RatingBand::General, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AccessPolicy;

    fn suggest_mpa(flags: ContentFlags) -> String {
        ModerationClassifier::new()
            .suggest(&flags, &RatingCatalog::mpa())
            .id
            .clone()
    }

    #[test]
    fn clean_content_is_general() {
        assert_eq!(suggest_mpa(ContentFlags::none()), "G");
    }

    #[test]
    fn nudity_wins_over_everything() {
        let flags = ContentFlags::from_flags(ContentFlag::ALL);
        assert_eq!(suggest_mpa(flags), "NC-17");
        assert_eq!(
            ModerationClassifier::new().triggers(&flags),
            vec![ContentFlag::Nudity]
        );
    }

    #[test]
    fn violence_and_discrimination_are_restricted() {
        assert_eq!(suggest_mpa(ContentFlags::none().with(ContentFlag::Violence)), "R");
        assert_eq!(
            suggest_mpa(ContentFlags::none().with(ContentFlag::Discrimination)),
            "R"
        );
    }

    #[test]
    fn violence_outranks_sexual_content() {
        let flags = ContentFlags::from_flags([ContentFlag::SexualContent, ContentFlag::Violence]);
        assert_eq!(suggest_mpa(flags), "R");
    }

    #[test]
    fn caution_step() {
        for flag in [
            ContentFlag::SexualContent,
            ContentFlag::Language,
            ContentFlag::DrugUse,
        ] {
            assert_eq!(suggest_mpa(ContentFlags::none().with(flag)), "PG-13", "{flag}");
        }
    }

    #[test]
    fn parental_step() {
        assert_eq!(suggest_mpa(ContentFlags::none().with(ContentFlag::Horror)), "PG");
        assert_eq!(suggest_mpa(ContentFlags::none().with(ContentFlag::Gambling)), "PG");
        let flags = ContentFlags::from_flags([ContentFlag::Horror, ContentFlag::Language]);
        assert_eq!(suggest_mpa(flags), "PG-13");
    }

    #[test]
    fn audience_taxonomy_mapping() {
        let catalog = RatingCatalog::audience();
        let classifier = ModerationClassifier::new();
        let id = |flags: ContentFlags| classifier.suggest(&flags, &catalog).id.clone();

        assert_eq!(id(ContentFlags::none().with(ContentFlag::Nudity)), "adult");
        assert_eq!(id(ContentFlags::none().with(ContentFlag::Violence)), "mature");
        // no caution band in this taxonomy, so the next stricter entry
        assert_eq!(id(ContentFlags::none().with(ContentFlag::Language)), "mature");
        assert_eq!(id(ContentFlags::none().with(ContentFlag::Horror)), "teen");
        assert_eq!(id(ContentFlags::none()), "general");
    }

    #[test]
    fn sparse_catalog_uses_only_entry() {
        let catalog = RatingCatalog::new(vec![Rating::new(
            "R",
            18,
            "Restricted",
            RatingBand::Restricted,
        )])
        .unwrap();
        let classifier = ModerationClassifier::new();
        assert_eq!(classifier.suggest(&ContentFlags::none(), &catalog).id, "R");
        assert_eq!(
            classifier
                .suggest(&ContentFlags::none().with(ContentFlag::Nudity), &catalog)
                .id,
            "R"
        );
    }

    #[test]
    fn missing_band_never_loosens_rating() {
        let catalog = RatingCatalog::new(vec![
            Rating::new("all", 0, "Everyone", RatingBand::General),
            Rating::new("18+", 18, "Over 18", RatingBand::Adult),
        ])
        .unwrap();
        let classifier = ModerationClassifier::new();

        for flag in ContentFlag::ALL {
            let rating = classifier.suggest(&ContentFlags::none().with(flag), &catalog);
            assert_eq!(rating.id, "18+", "{flag} resolved to {}", rating.id);
        }
        assert_eq!(classifier.suggest(&ContentFlags::none(), &catalog).id, "all");

        let now = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let violent = ContentFlags::none().with(ContentFlag::Violence);
        let rating = classifier.suggest(&violent, &catalog);
        assert!(!AccessPolicy::new().is_allowed(None, rating, now).allowed);
    }

    #[test]
    fn stricter_fallback_prefers_least_restrictive_higher_band() {
        let catalog = RatingCatalog::new(vec![
            Rating::new("G", 0, "General", RatingBand::General),
            Rating::new("X", 21, "Explicit", RatingBand::Adult),
            Rating::new("R", 18, "Restricted", RatingBand::Restricted),
        ])
        .unwrap();
        let classifier = ModerationClassifier::new();
        assert_eq!(
            classifier
                .suggest(&ContentFlags::none().with(ContentFlag::Horror), &catalog)
                .id,
            "R"
        );
    }

    #[test]
    fn review_produces_record() {
        let flags = ContentFlags::from_flags([ContentFlag::DrugUse, ContentFlag::Language]);
        let record =
            ModerationClassifier::new().review("clip-42", &flags, &RatingCatalog::mpa());
        assert_eq!(record.content_id, "clip-42");
        assert_eq!(record.rating_id, "PG-13");
        assert_eq!(record.band, RatingBand::Caution);
        assert_eq!(
            record.triggers,
            vec![ContentFlag::Language, ContentFlag::DrugUse]
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["contentId"], "clip-42");
        assert_eq!(json["ratingId"], "PG-13");
        assert_eq!(json["flags"]["drugUse"], true);
    }
}
