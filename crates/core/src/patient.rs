//! Patient records.
//!
//! A patient is created once at onboarding and then mutated only by symptom reports and
//! completed diagnostic runs. Records are never removed during a session.

use crate::validation::Field;
use crate::KioskResult;
use chrono::{DateTime, Utc};
use hl_uuid::MedicalId;
use serde::Serialize;
use std::fmt;

/// Free-text profile fields collected at onboarding.
#[derive(Clone, Debug, Default)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
}

impl PatientForm {
    /// Checks every field against the strict-input rules.
    pub fn validate(&self) -> KioskResult<()> {
        Field::Name.validate(&self.name)?;
        Field::Email.validate(&self.email)?;
        Field::Password.validate(&self.password)?;
        Field::BirthDate.validate(&self.birth_date)?;
        Ok(())
    }
}

/// A yes/no answer to a diagnostic question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parses `y`, `yes`, `n` or `no`, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Answer> {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: Answer,
}

/// One completed diagnostic run, kept in the patient's history.
#[derive(Clone, Debug, Serialize)]
pub struct DiagnosisEntry {
    pub symptom: String,
    pub diagnosis: String,
    /// Snapshot of the answers given during this run.
    pub answers: Vec<QuestionAnswer>,
    pub recorded_at: DateTime<Utc>,
}

/// A patient registered at the kiosk.
///
/// The password is held and displayed in plain text. No security claim is made for it.
#[derive(Clone, Debug)]
pub struct Patient {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
    medical_id: MedicalId,
    symptom: Option<String>,
    answers: Vec<QuestionAnswer>,
    history: Vec<DiagnosisEntry>,
}

impl Patient {
    pub fn new(form: PatientForm, medical_id: MedicalId) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
            birth_date: form.birth_date,
            medical_id,
            symptom: None,
            answers: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn medical_id(&self) -> &MedicalId {
        &self.medical_id
    }

    /// Records the symptom the patient reports, replacing any earlier one.
    ///
    /// The text is stored exactly as given; normalisation happens at flow lookup.
    pub fn report_symptom(&mut self, symptom: impl Into<String>) {
        self.symptom = Some(symptom.into());
    }

    pub fn symptom(&self) -> Option<&str> {
        self.symptom.as_deref()
    }

    /// Answers from the most recent completed diagnostic run.
    pub fn answers(&self) -> &[QuestionAnswer] {
        &self.answers
    }

    pub fn history(&self) -> &[DiagnosisEntry] {
        &self.history
    }

    pub(crate) fn record_diagnosis(&mut self, entry: DiagnosisEntry) {
        self.answers = entry.answers.clone();
        self.history.push(entry);
    }
}
