// src/error.rs
//! Error handling for the crate.
//!
//! The control loop itself never fails; airborne and near-zero speed are
//! branches, not errors. The only fallible paths are at the edges: reading
//! and validating a tuning file. Enum discriminant keeps matching cheap;
//! allocations happen only on error paths.

use thiserror::Error;

/// Main error type — lightweight, Send + Sync + 'static.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O errors (tuning file access).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of the tuning file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tuning parameter is outside its valid range.
    #[error("invalid tuning: {0}")]
    Tuning(String),
}

impl Error {
    /// Create a tuning-validation error.
    #[inline]
    pub fn tuning<S: Into<String>>(msg: S) -> Self {
        Self::Tuning(msg.into())
    }

    #[inline]
    pub fn is_tuning(&self) -> bool {
        matches!(self, Error::Tuning(_))
    }
}

/// Convenient `Result` alias — use `crate::Result<T>` everywhere.
pub type Result<T> = std::result::Result<T, Error>;
