use chrono::NaiveDate;
use thiserror::Error;

/// Rejections of an age fact before it is stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("birth date {birth_date} is in the future (today is {today})")]
    FutureBirthDate {
        birth_date: NaiveDate,
        today: NaiveDate,
    },

    #[error("age {age} is below the minimum age of {floor}")]
    BelowMinimumAge { age: u32, floor: u32 },
}

/// Errors from the gating core.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("rating not found in catalog: {0}")]
    RatingNotFound(String),

    #[error("age fact rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid rating catalog: {0}")]
    InvalidCatalog(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("lock acquisition failed")]
    LockError,
}

impl From<std::io::Error> for GateError {
    fn from(e: std::io::Error) -> Self {
        GateError::Persistence(e.to_string())
    }
}

/// Convenience type alias for gate results.
pub type GateResult<T> = Result<T, GateError>;
