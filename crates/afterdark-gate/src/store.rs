//! Age fact store — durable read/write of the single age record.
//!
//! The store owns validation and parsing; backends only move an opaque JSON
//! record in and out. `load` never fails: an absent, unreadable or
//! unparseable record all mean "age unknown" to policy callers, and the cause
//! is logged.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use afterdark_types::{compute_age, AgeFact};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::error::{GateError, GateResult, ValidationError};

/// Key the client application stores the record under.
pub const AGE_FACT_KEY: &str = "age_verification";

/// Youngest age the product accepts at all.
pub const DEFAULT_MINIMUM_AGE_FLOOR: u32 = 13;

/// Storage for one serialized age record.
pub trait FactBackend: Send + Sync {
    /// Read the raw record. `Ok(None)` when nothing was ever written.
    fn read(&self) -> GateResult<Option<String>>;

    /// Replace the raw record.
    fn write(&self, record: &str) -> GateResult<()>;

    /// Remove the record.
    fn clear(&self) -> GateResult<()>;
}

/// JSON-file backend.
///
/// Writes go to a `.tmp` sibling and are renamed into place so an
/// interrupted write never leaves a truncated record.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at `<dir>/age_verification.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{AGE_FACT_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactBackend for JsonFileBackend {
    fn read(&self) -> GateResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn write(&self, record: &str) -> GateResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, record)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn clear(&self) -> GateResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory backend (for testing and ephemeral sessions).
#[derive(Default)]
pub struct InMemoryBackend {
    record: Mutex<Option<String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a raw record, parseable or not.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl FactBackend for InMemoryBackend {
    fn read(&self) -> GateResult<Option<String>> {
        let record = self.record.lock().map_err(|_| GateError::LockError)?;
        Ok(record.clone())
    }

    fn write(&self, record: &str) -> GateResult<()> {
        let mut slot = self.record.lock().map_err(|_| GateError::LockError)?;
        *slot = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) -> GateResult<()> {
        let mut slot = self.record.lock().map_err(|_| GateError::LockError)?;
        *slot = None;
        Ok(())
    }
}

/// The age fact store.
///
/// Saves are serialized through an internal mutex, so one store may be shared
/// between threads without turning last-write-wins into lost writes.
pub struct AgeFactStore<B: FactBackend> {
    backend: B,
    minimum_age_floor: u32,
    write_lock: Mutex<()>,
}

impl<B: FactBackend> AgeFactStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_floor(backend, DEFAULT_MINIMUM_AGE_FLOOR)
    }

    pub fn with_floor(backend: B, minimum_age_floor: u32) -> Self {
        Self {
            backend,
            minimum_age_floor,
            write_lock: Mutex::new(()),
        }
    }

    pub fn minimum_age_floor(&self) -> u32 {
        self.minimum_age_floor
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the stored fact.
    pub fn load(&self) -> Option<AgeFact> {
        let raw = match self.backend.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no age fact stored");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "failed to read age fact, treating age as unknown");
                return None;
            }
        };

        match serde_json::from_str::<AgeFact>(&raw) {
            Ok(fact) => Some(fact),
            Err(e) => {
                warn!(error = %e, "discarding unparseable age fact");
                None
            }
        }
    }

    /// Validate and store `fact`, judged against today's UTC date.
    pub fn save(&self, fact: &AgeFact) -> GateResult<()> {
        self.save_as_of(fact, Utc::now().date_naive())
    }

    /// Validate and store `fact`, judged against `today`.
    ///
    /// Overwrites any prior fact. A rejected fact leaves the stored record
    /// untouched.
    pub fn save_as_of(&self, fact: &AgeFact, today: NaiveDate) -> GateResult<()> {
        let age = self.validate(fact, today)?;

        let record = serde_json::to_string(fact)
            .map_err(|e| GateError::Persistence(format!("serialization failed: {e}")))?;

        let _guard = self.write_lock.lock().map_err(|_| GateError::LockError)?;
        self.backend.write(&record)?;

        info!(
            age,
            verified = fact.is_verified,
            level = fact.verification_level.as_str(),
            "age fact saved"
        );
        Ok(())
    }

    /// Check `fact` against `today` and the configured floor, returning the age.
    pub fn validate(&self, fact: &AgeFact, today: NaiveDate) -> Result<u32, ValidationError> {
        let age = compute_age(fact.birth_date, today);
        if age < 0 {
            return Err(ValidationError::FutureBirthDate {
                birth_date: fact.birth_date,
                today,
            });
        }

        let age = age as u32;
        if age < self.minimum_age_floor {
            return Err(ValidationError::BelowMinimumAge {
                age,
                floor: self.minimum_age_floor,
            });
        }
        Ok(age)
    }

    /// Forget the stored fact.
    pub fn clear(&self) -> GateResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| GateError::LockError)?;
        self.backend.clear()?;
        info!("age fact cleared");
        Ok(())
    }
}
