//! Configuration for the gating core

use std::path::{Path, PathBuf};

use afterdark_types::Rating;
use serde::{Deserialize, Serialize};

use crate::catalog::{RatingCatalog, Taxonomy, UnknownRatingPolicy};
use crate::error::{GateError, GateResult};
use crate::store::{AGE_FACT_KEY, DEFAULT_MINIMUM_AGE_FLOOR};

/// Main gate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Rating catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Youngest age a stored fact may describe
    #[serde(default = "default_minimum_age_floor")]
    pub minimum_age_floor: u32,

    /// Handling of rating ids missing from the catalog
    #[serde(default)]
    pub unknown_rating: UnknownRatingPolicy,

    /// Age fact storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            minimum_age_floor: DEFAULT_MINIMUM_AGE_FLOOR,
            unknown_rating: UnknownRatingPolicy::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GateConfig {
    /// Load from a YAML or JSON file, or defaults when `path` is `None`.
    ///
    /// `.json` files are parsed as JSON; anything else as YAML.
    pub fn load(path: Option<&Path>) -> GateResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            GateError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    pub fn from_yaml_str(contents: &str) -> GateResult<Self> {
        serde_yaml::from_str(contents).map_err(|e| GateError::Config(e.to_string()))
    }

    pub fn from_json_str(contents: &str) -> GateResult<Self> {
        serde_json::from_str(contents).map_err(|e| GateError::Config(e.to_string()))
    }

    pub fn build_catalog(&self) -> GateResult<RatingCatalog> {
        self.catalog.build()
    }
}

/// Rating catalog source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "taxonomy", rename_all = "lowercase")]
pub enum CatalogConfig {
    /// `G / PG / PG-13 / R / NC-17 / X`
    Mpa,

    /// `general / teen / mature / adult`
    Audience,

    /// Explicit rating table
    Custom {
        ratings: Vec<Rating>,
    },
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig::Mpa
    }
}

impl CatalogConfig {
    pub fn build(&self) -> GateResult<RatingCatalog> {
        match self {
            CatalogConfig::Mpa => Ok(RatingCatalog::from_taxonomy(Taxonomy::Mpa)),
            CatalogConfig::Audience => Ok(RatingCatalog::from_taxonomy(Taxonomy::Audience)),
            CatalogConfig::Custom { ratings } => RatingCatalog::new(ratings.clone()),
        }
    }
}

/// Age fact storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the age fact
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_minimum_age_floor() -> u32 {
    DEFAULT_MINIMUM_AGE_FLOOR
}

fn default_store_path() -> PathBuf {
    PathBuf::from(format!("{AGE_FACT_KEY}.json"))
}

fn default_log_level() -> String {
    "info".to_string()
}
