//! Constants used throughout the Health-Link core crate.
//!
//! Artefact naming lives here so the kiosk, the companion CLI and the tests agree on where
//! a patient's files end up.

/// Default directory for ID artefacts when no explicit directory is configured.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Suffix appended to the patient's name for the QR code image.
pub const QR_FILE_SUFFIX: &str = "_QR.png";

/// Suffix appended to the patient's name for the plain-text ID file.
pub const ID_FILE_SUFFIX: &str = "_ID.txt";

/// Prefix written before the Medical ID in the plain-text ID file.
pub const ID_FILE_PREFIX: &str = "Patient ID: ";

/// Audit role recorded for patient onboarding.
pub const PATIENT_AUDIT_ROLE: &str = "Patient";
