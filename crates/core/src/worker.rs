//! Health worker records.

use crate::diagnosis::{run_diagnostic, AnswerSource, DiagnosticOutcome};
use crate::directory::Specialty;
use crate::patient::Patient;
use crate::session::Session;
use crate::validation::Field;
use crate::KioskResult;
use hl_uuid::MedicalId;
use std::fmt;

/// Role recorded for a worker, derived from their specialty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Doctor,
    Nurse,
    Admin,
}

impl Role {
    /// Nurses and admins keep their own role; every other specialty is a doctor.
    pub fn for_specialty(specialty: Specialty) -> Role {
        match specialty {
            Specialty::Nurse => Role::Nurse,
            Specialty::Admin => Role::Admin,
            Specialty::GeneralPractitioner
            | Specialty::Dentist
            | Specialty::Surgeon
            | Specialty::Pediatrician
            | Specialty::Cardiologist => Role::Doctor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Doctor => "Doctor",
            Role::Nurse => "Nurse",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile fields collected when a health worker registers.
#[derive(Clone, Debug)]
pub struct WorkerForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
    pub specialty: Specialty,
}

impl WorkerForm {
    /// Checks the free-text fields against the strict-input rules.
    pub fn validate(&self) -> KioskResult<()> {
        Field::Name.validate(&self.name)?;
        Field::Email.validate(&self.email)?;
        Field::Password.validate(&self.password)?;
        Field::BirthDate.validate(&self.birth_date)?;
        Ok(())
    }
}

/// A registered health worker. Immutable once created.
#[derive(Clone, Debug)]
pub struct Worker {
    name: String,
    email: String,
    password: String,
    birth_date: String,
    role: Role,
    specialty: Specialty,
}

impl Worker {
    pub fn new(form: WorkerForm) -> Self {
        Self {
            role: Role::for_specialty(form.specialty),
            name: form.name,
            email: form.email,
            password: form.password,
            birth_date: form.birth_date,
            specialty: form.specialty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    /// Runs the diagnostic flow for `patient`'s current symptom.
    pub fn diagnose<A>(
        &self,
        patient: &mut Patient,
        answers: &mut A,
    ) -> KioskResult<DiagnosticOutcome>
    where
        A: AnswerSource + ?Sized,
    {
        tracing::info!(
            role = %self.role,
            specialty = %self.specialty,
            medical_id = %patient.medical_id(),
            "starting diagnostic flow"
        );
        run_diagnostic(patient, answers)
    }

    /// Read-only lookup of a patient in the session registry.
    pub fn lookup_patient<'s>(&self, session: &'s Session, id: &MedicalId) -> Option<&'s Patient> {
        session.patient(id)
    }
}
