use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum DayboardError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid date '{0}' (expected YYYY-MM-DDTHH:MM)")]
    InvalidDate(String),

    #[error("unknown category '{0}' (expected Work, Personal or Other)")]
    InvalidCategory(String),

    #[error("minutes must be between 1 and 1440, got {0}")]
    InvalidMinutes(u32),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl DayboardError {
    /// True for errors caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        !matches!(self, DayboardError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, DayboardError>;
