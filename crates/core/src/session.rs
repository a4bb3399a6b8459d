//! The kiosk session: registries, audit log and the operations the menu dispatches to.
//!
//! A `Session` is created by the process at startup and dropped at exit. Nothing here is
//! global; every operation takes the session explicitly.

use crate::audit::AuditLog;
use crate::config::KioskConfig;
use crate::constants::PATIENT_AUDIT_ROLE;
use crate::diagnosis::{AnswerSource, DiagnosticOutcome};
use crate::directory::Specialty;
use crate::identity::{IdArtifacts, IdentityIssuer};
use crate::patient::{Patient, PatientForm};
use crate::worker::{Role, Worker, WorkerForm};
use crate::KioskResult;
use hl_uuid::MedicalId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Result of onboarding a patient.
///
/// Artefact writing is best effort: the patient is registered even when `artifacts` holds an
/// error.
#[derive(Debug)]
pub struct PatientOnboarding {
    pub medical_id: MedicalId,
    pub artifacts: KioskResult<IdArtifacts>,
}

/// Result of matching a patient to a worker and running the diagnostic flow.
#[derive(Debug)]
pub enum MatchOutcome {
    PatientNotFound,
    NoWorker(Specialty),
    Examined {
        worker_name: String,
        role: Role,
        outcome: DiagnosticOutcome,
    },
}

pub struct Session {
    cfg: Arc<KioskConfig>,
    issuer: IdentityIssuer,
    patients: HashMap<MedicalId, Patient>,
    workers: BTreeMap<Specialty, Vec<Worker>>,
    audit: AuditLog,
}

impl Session {
    pub fn new(cfg: Arc<KioskConfig>) -> Self {
        let issuer = IdentityIssuer::new(cfg.output_dir());
        Self {
            cfg,
            issuer,
            patients: HashMap::new(),
            workers: BTreeMap::new(),
            audit: AuditLog::new(),
        }
    }

    pub fn config(&self) -> &KioskConfig {
        &self.cfg
    }

    /// Registers a patient, issues their Medical ID artefacts and records a login event.
    ///
    /// # Errors
    ///
    /// Only when strict input is enabled and a field fails validation. In that case nothing is
    /// registered, written or logged.
    pub fn onboard_patient(&mut self, form: PatientForm) -> KioskResult<PatientOnboarding> {
        if self.cfg.strict_input() {
            form.validate()?;
        }

        let medical_id = self.allocate_medical_id();
        let artifacts = self.issuer.issue(&form.name, &medical_id);
        if let Err(e) = &artifacts {
            tracing::warn!(
                medical_id = %medical_id,
                "failed to write medical id artefacts: {}",
                e
            );
        }

        self.audit.record(PATIENT_AUDIT_ROLE, form.name.clone());
        self.patients.insert(medical_id, Patient::new(form, medical_id));

        tracing::info!(medical_id = %medical_id, "patient onboarded");

        Ok(PatientOnboarding {
            medical_id,
            artifacts,
        })
    }

    /// Registers a health worker under their specialty and records a login event.
    ///
    /// # Errors
    ///
    /// Only when strict input is enabled and a field fails validation.
    pub fn onboard_worker(&mut self, form: WorkerForm) -> KioskResult<&Worker> {
        if self.cfg.strict_input() {
            form.validate()?;
        }

        let worker = Worker::new(form);
        self.audit.record(worker.role().as_str(), worker.name());

        tracing::info!(
            role = %worker.role(),
            specialty = %worker.specialty(),
            "health worker onboarded"
        );

        let bucket = self.workers.entry(worker.specialty()).or_default();
        bucket.push(worker);
        Ok(&bucket[bucket.len() - 1])
    }

    /// Workers registered under `specialty`, in registration order. Empty when there are none.
    pub fn workers_for(&self, specialty: Specialty) -> &[Worker] {
        self.workers
            .get(&specialty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first worker registered under `specialty`, if any.
    pub fn first_worker(&self, specialty: Specialty) -> Option<&Worker> {
        self.workers_for(specialty).first()
    }

    pub fn patient(&self, id: &MedicalId) -> Option<&Patient> {
        let found = self.patients.get(id);
        tracing::debug!(medical_id = %id, found = found.is_some(), "patient lookup");
        found
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// Matches a patient with the first worker of `specialty`, records `symptom` and runs the
    /// diagnostic flow.
    ///
    /// The symptom is only recorded once both the patient and a worker have been found.
    ///
    /// # Errors
    ///
    /// Propagates errors from `answers`; a run aborted that way records no diagnosis.
    pub fn match_and_diagnose<A>(
        &mut self,
        id: &MedicalId,
        specialty: Specialty,
        symptom: &str,
        answers: &mut A,
    ) -> KioskResult<MatchOutcome>
    where
        A: AnswerSource + ?Sized,
    {
        let Some(patient) = self.patients.get_mut(id) else {
            return Ok(MatchOutcome::PatientNotFound);
        };
        let Some(worker) = self.workers.get(&specialty).and_then(|w| w.first()) else {
            return Ok(MatchOutcome::NoWorker(specialty));
        };

        patient.report_symptom(symptom);
        let outcome = worker.diagnose(patient, answers)?;

        Ok(MatchOutcome::Examined {
            worker_name: worker.name().to_string(),
            role: worker.role(),
            outcome,
        })
    }

    fn allocate_medical_id(&self) -> MedicalId {
        loop {
            let id = MedicalId::new();
            if !self.patients.contains_key(&id) {
                return id;
            }
        }
    }
}
