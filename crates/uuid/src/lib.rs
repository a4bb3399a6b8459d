//! Medical ID generation and parsing.
//!
//! Every patient onboarded at the kiosk receives a Medical ID. It is the key used to scan a
//! patient back up, it is what the QR artefact encodes, and it is what the `_ID.txt` artefact
//! prints.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! This is the same value you would get from `Uuid::new_v4().simple().to_string()`. Scanned
//! input may carry surrounding whitespace (trailing newline from a reader, for example), which
//! [`MedicalId::parse`] trims; anything else that is not canonical is rejected.

mod service;

pub use service::{MedicalId, Uuid};

/// Error type for Medical ID operations.
#[derive(Debug, thiserror::Error)]
pub enum MedicalIdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for Medical ID operations.
pub type MedicalIdResult<T> = Result<T, MedicalIdError>;
