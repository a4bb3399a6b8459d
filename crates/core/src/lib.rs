//! # Health-Link Core
//!
//! Core logic for the Health-Link clinic kiosk:
//! - Static directory data (specialties and symptom flows)
//! - Patient and health worker records
//! - Medical ID artefacts (QR image and ID text file)
//! - The diagnostic question/answer flow
//! - The session registry, login audit log and console menu
//!
//! Everything is in memory for the lifetime of one session. The only files written are the two
//! ID artefacts per patient.
//!
//! **No process concerns**: reading environment variables and installing a log subscriber
//! belong in the binaries.

pub mod audit;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod directory;
pub mod error;
pub mod identity;
pub mod kiosk;
pub mod patient;
pub mod session;
pub mod validation;
pub mod worker;

pub use config::KioskConfig;
pub use diagnosis::{run_diagnostic, AnswerSource, DiagnosticOutcome};
pub use directory::{lookup_flow, DiagnosticFlow, Specialty};
pub use error::{KioskError, KioskResult};
pub use identity::{IdArtifacts, IdentityIssuer};
pub use kiosk::{Kiosk, Operator};
pub use patient::{Answer, DiagnosisEntry, Patient, PatientForm, QuestionAnswer};
pub use session::{MatchOutcome, PatientOnboarding, Session};
pub use worker::{Role, Worker, WorkerForm};

// Re-export the shared primitives so binaries need only depend on core.
pub use hl_types::{BirthDate, EmailAddress, NonEmptyText, TextError};
pub use hl_uuid::MedicalId;
