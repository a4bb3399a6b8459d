//! The diagnostic flow.
//!
//! A straight-line procedure: look up the patient's symptom, ask that flow's questions in
//! order, then record the canned diagnosis together with a snapshot of the answers. The only
//! branch is whether a flow exists for the symptom.

use crate::directory::lookup_flow;
use crate::patient::{Answer, DiagnosisEntry, Patient, QuestionAnswer};
use crate::KioskResult;
use chrono::Utc;

/// Supplies answers to diagnostic questions.
///
/// The kiosk implements this over the console. Returning an error aborts the run before
/// anything is recorded.
pub trait AnswerSource {
    fn answer(&mut self, question: &str) -> KioskResult<Answer>;
}

/// Result of a diagnostic run.
#[derive(Clone, Debug)]
pub enum DiagnosticOutcome {
    /// The patient has not reported a symptom.
    NoSymptom,
    /// No flow exists for the reported symptom. Nothing was recorded.
    NoFlow { symptom: String },
    /// The flow completed and this entry was appended to the patient's history.
    Diagnosed(DiagnosisEntry),
}

/// Runs the flow for the patient's current symptom.
///
/// # Errors
///
/// Propagates any error from `answers`; the patient is left untouched in that case.
pub fn run_diagnostic<A>(patient: &mut Patient, answers: &mut A) -> KioskResult<DiagnosticOutcome>
where
    A: AnswerSource + ?Sized,
{
    let Some(symptom) = patient.symptom().map(str::to_owned) else {
        return Ok(DiagnosticOutcome::NoSymptom);
    };

    let Some(flow) = lookup_flow(&symptom) else {
        tracing::debug!(symptom = %symptom, "no diagnostic flow for symptom");
        return Ok(DiagnosticOutcome::NoFlow { symptom });
    };

    let mut collected = Vec::with_capacity(flow.questions.len());
    for question in flow.questions {
        let answer = answers.answer(question)?;
        collected.push(QuestionAnswer {
            question: (*question).to_string(),
            answer,
        });
    }

    let entry = DiagnosisEntry {
        symptom: flow.symptom.to_string(),
        diagnosis: flow.diagnosis.to_string(),
        answers: collected,
        recorded_at: Utc::now(),
    };
    patient.record_diagnosis(entry.clone());

    tracing::info!(
        medical_id = %patient.medical_id(),
        symptom = flow.symptom,
        "diagnosis recorded"
    );

    Ok(DiagnosticOutcome::Diagnosed(entry))
}

/// Answers taken from a fixed list, for tests.
#[cfg(test)]
pub(crate) struct ScriptedAnswers {
    remaining: std::collections::VecDeque<Answer>,
    pub(crate) asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedAnswers {
    pub(crate) fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            remaining: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl AnswerSource for ScriptedAnswers {
    fn answer(&mut self, question: &str) -> KioskResult<Answer> {
        self.asked.push(question.to_string());
        self.remaining
            .pop_front()
            .ok_or(crate::KioskError::InputClosed)
    }
}
