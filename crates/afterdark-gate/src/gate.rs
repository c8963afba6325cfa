//! Unified gate facade
//!
//! Bundles the configured catalog, the age fact store and the stateless
//! policy and classifier behind the calls a UI gate or moderation screen
//! makes.

use afterdark_types::{AccessDecision, AgeFact, ContentFlags, Rating};
use chrono::NaiveDate;

use crate::catalog::RatingCatalog;
use crate::config::GateConfig;
use crate::error::GateResult;
use crate::filter::{ContentFilter, Rated};
use crate::moderation::{ModerationClassifier, ModerationRecord};
use crate::policy::AccessPolicy;
use crate::store::{AgeFactStore, FactBackend, JsonFileBackend};

pub struct AgeGate<B: FactBackend> {
    config: GateConfig,
    catalog: RatingCatalog,
    store: AgeFactStore<B>,
    policy: AccessPolicy,
    classifier: ModerationClassifier,
}

impl AgeGate<JsonFileBackend> {
    /// Gate backed by the JSON file named in `config.store.path`.
    pub fn open(config: GateConfig) -> GateResult<Self> {
        let backend = JsonFileBackend::new(config.store.path.clone());
        Self::with_backend(config, backend)
    }
}

impl<B: FactBackend> AgeGate<B> {
    pub fn with_backend(config: GateConfig, backend: B) -> GateResult<Self> {
        let catalog = config.build_catalog()?;
        let store = AgeFactStore::with_floor(backend, config.minimum_age_floor);
        Ok(Self {
            config,
            catalog,
            store,
            policy: AccessPolicy::new(),
            classifier: ModerationClassifier::new(),
        })
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn catalog(&self) -> &RatingCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &AgeFactStore<B> {
        &self.store
    }

    pub fn current_fact(&self) -> Option<AgeFact> {
        self.store.load()
    }

    /// Store a new fact, judged against today's date.
    pub fn verify(&self, fact: &AgeFact) -> GateResult<()> {
        self.store.save(fact)
    }

    pub fn verify_as_of(&self, fact: &AgeFact, today: NaiveDate) -> GateResult<()> {
        self.store.save_as_of(fact, today)
    }

    pub fn forget(&self) -> GateResult<()> {
        self.store.clear()
    }

    /// Access decision for the stored fact against rating `rating_id`.
    pub fn check(&self, rating_id: &str, now: NaiveDate) -> GateResult<AccessDecision> {
        let rating = self.catalog.resolve(rating_id, self.config.unknown_rating)?;
        let fact = self.store.load();
        Ok(self.policy.is_allowed(fact.as_ref(), rating, now))
    }

    /// Ratings the stored fact grants access to.
    pub fn accessible(&self, now: NaiveDate) -> Vec<&Rating> {
        let fact = self.store.load();
        self.policy
            .accessible_ratings(fact.as_ref(), &self.catalog, now)
    }

    /// Feed items the stored fact may see.
    pub fn visible<'i, T: Rated>(&self, items: &'i [T], now: NaiveDate) -> Vec<&'i T> {
        let fact = self.store.load();
        ContentFilter::new(&self.catalog).visible(fact.as_ref(), items, now)
    }

    pub fn suggest(&self, flags: &ContentFlags) -> &Rating {
        self.classifier.suggest(flags, &self.catalog)
    }

    pub fn review(&self, content_id: impl Into<String>, flags: &ContentFlags) -> ModerationRecord {
        self.classifier.review(content_id, flags, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnknownRatingPolicy;
    use crate::config::CatalogConfig;
    use crate::error::GateError;
    use crate::store::InMemoryBackend;
    use afterdark_types::ContentFlag;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gate(config: GateConfig) -> AgeGate<InMemoryBackend> {
        AgeGate::with_backend(config, InMemoryBackend::new()).unwrap()
    }

    #[test]
    fn check_before_and_after_verification() {
        let gate = gate(GateConfig::default());
        let now = date(2024, 6, 15);

        let before = gate.check("R", now).unwrap();
        assert!(before.needs_verification());

        gate.verify_as_of(&AgeFact::declared(date(2000, 1, 1)), now)
            .unwrap();
        let after = gate.check("R", now).unwrap();
        assert!(after.allowed);
        assert_eq!(after.user_age, Some(24));
    }

    #[test]
    fn unknown_rating_follows_config() {
        let now = date(2024, 6, 15);
        let strict = gate(GateConfig::default());
        assert!(matches!(
            strict.check("TV-MA", now),
            Err(GateError::RatingNotFound(_))
        ));

        let lenient = gate(GateConfig {
            unknown_rating: UnknownRatingPolicy::LowestTier,
            ..GateConfig::default()
        });
        assert!(lenient.check("TV-MA", now).unwrap().allowed);
    }

    #[test]
    fn floor_comes_from_config() {
        let gate = gate(GateConfig {
            minimum_age_floor: 18,
            ..GateConfig::default()
        });
        let now = date(2024, 6, 15);
        assert!(gate
            .verify_as_of(&AgeFact::declared(date(2008, 1, 1)), now)
            .is_err());
        assert!(gate.current_fact().is_none());
    }

    #[test]
    fn audience_gate_suggests_audience_ids() {
        let gate = gate(GateConfig {
            catalog: CatalogConfig::Audience,
            ..GateConfig::default()
        });
        let flags = ContentFlags::none().with(ContentFlag::Violence);
        assert_eq!(gate.suggest(&flags).id, "mature");
        assert_eq!(gate.review("v1", &flags).rating_id, "mature");
    }

    #[test]
    fn accessible_and_forget() {
        let gate = gate(GateConfig::default());
        let now = date(2024, 6, 15);
        gate.verify_as_of(&AgeFact::declared(date(2010, 1, 1)), now)
            .unwrap();
        assert_eq!(gate.accessible(now).len(), 3);

        gate.forget().unwrap();
        assert!(gate.accessible(now).is_empty());
    }
}
