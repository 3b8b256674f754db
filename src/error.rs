//! Caller-visible error taxonomy for the stores. Validation failures,
//! uniqueness conflicts and missing rows are distinct variants so embedding
//! layers can disambiguate without string matching. Nothing here is retried
//! internally; writes are not idempotent.

use thiserror::Error;

pub use crate::validate::{FieldViolation, ValidationError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("duplicate discord id: {0}")]
    ConstraintViolation(String),

    #[error("officer not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("migration error: {0}")]
    Migration(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
