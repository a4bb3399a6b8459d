//! Console front end for the kiosk.
//!
//! The kiosk reads from any `BufRead` and writes to any `Write`, so the binary can hand it
//! locked stdin/stdout while tests hand it a `Cursor` and a `Vec<u8>`. End of input at any
//! prompt ends the session the same way choosing Exit does.

use crate::diagnosis::{AnswerSource, DiagnosticOutcome};
use crate::directory::Specialty;
use crate::patient::{Answer, Patient, PatientForm};
use crate::session::{MatchOutcome, Session};
use crate::validation::Field;
use crate::worker::WorkerForm;
use crate::{KioskError, KioskResult};
use hl_uuid::MedicalId;
use std::fmt;
use std::io::{BufRead, Write};

/// Who is operating the kiosk, chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Patient,
    HealthWorker,
}

impl Operator {
    fn from_input(input: &str) -> Option<Operator> {
        match input.trim() {
            "1" => Some(Operator::Patient),
            "2" => Some(Operator::HealthWorker),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Patient => f.write_str("Patient"),
            Operator::HealthWorker => f.write_str("Health Worker"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    OnboardPatient,
    OnboardWorker,
    SearchWorkers,
    ScanId,
    MatchPatient,
    ViewAudit,
    Exit,
}

impl MenuChoice {
    fn from_input(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::OnboardPatient),
            "2" => Some(MenuChoice::OnboardWorker),
            "3" => Some(MenuChoice::SearchWorkers),
            "4" => Some(MenuChoice::ScanId),
            "5" => Some(MenuChoice::MatchPatient),
            "6" => Some(MenuChoice::ViewAudit),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MAIN_MENU: &str = "\
1. Onboard Patient
2. Onboard Health Worker
3. Search Health Workers by Specialty
4. Scan Medical ID
5. Match Patient to Health Worker
6. View Login Audit Log
7. Exit
";

/// Prints `label` and reads one line, without its trailing newline.
///
/// Returns [`KioskError::InputClosed`] at end of input.
fn prompt<R, W>(input: &mut R, output: &mut W, label: &str) -> KioskResult<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{label}").map_err(KioskError::Console)?;
    output.flush().map_err(KioskError::Console)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(KioskError::Console)?;
    if read == 0 {
        return Err(KioskError::InputClosed);
    }

    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

/// Asks diagnostic questions over the console, re-prompting until a yes/no answer is given.
struct ConsoleAnswers<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> AnswerSource for ConsoleAnswers<'_, R, W> {
    fn answer(&mut self, question: &str) -> KioskResult<Answer> {
        loop {
            let raw = prompt(self.input, self.output, &format!("{question} (yes/no): "))?;
            match Answer::parse(&raw) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please answer yes or no.")
                    .map_err(KioskError::Console)?,
            }
        }
    }
}

/// The interactive kiosk.
pub struct Kiosk<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Kiosk<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the session and the output writer, ending the kiosk.
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// Runs the kiosk until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::Console` if the console cannot be read or written.
    pub fn run(&mut self) -> KioskResult<()> {
        match self.run_menu() {
            Err(KioskError::InputClosed) => {
                tracing::info!("console input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn run_menu(&mut self) -> KioskResult<()> {
        self.say("=== Health-Link Kiosk ===")?;
        let operator = self.choose_operator()?;

        let span = tracing::info_span!("kiosk", operator = %operator);
        let _guard = span.enter();
        tracing::info!("session started");

        loop {
            self.say(&format!("\n--- Main Menu ({operator}) ---"))?;
            write!(self.output, "{MAIN_MENU}").map_err(KioskError::Console)?;
            let raw = self.ask("Enter choice: ")?;

            match MenuChoice::from_input(&raw) {
                Some(MenuChoice::OnboardPatient) => self.onboard_patient()?,
                Some(MenuChoice::OnboardWorker) => self.onboard_worker()?,
                Some(MenuChoice::SearchWorkers) => self.search_workers()?,
                Some(MenuChoice::ScanId) => self.scan_id()?,
                Some(MenuChoice::MatchPatient) => self.match_patient()?,
                Some(MenuChoice::ViewAudit) => self.view_audit()?,
                Some(MenuChoice::Exit) => {
                    self.say("Goodbye!")?;
                    tracing::info!(
                        patients = self.session.patient_count(),
                        logins = self.session.audit_log().len(),
                        "session ended"
                    );
                    return Ok(());
                }
                None => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    fn choose_operator(&mut self) -> KioskResult<Operator> {
        loop {
            self.say("Are you a:\n1. Patient\n2. Health Worker")?;
            let raw = self.ask("Enter choice: ")?;
            match Operator::from_input(&raw) {
                Some(operator) => return Ok(operator),
                None => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    fn onboard_patient(&mut self) -> KioskResult<()> {
        self.say("\n--- Patient Onboarding ---")?;
        let form = PatientForm {
            name: self.ask_field(Field::Name)?,
            email: self.ask_field(Field::Email)?,
            password: self.ask_field(Field::Password)?,
            birth_date: self.ask_field(Field::BirthDate)?,
        };

        let onboarding = match self.session.onboard_patient(form) {
            Ok(onboarding) => onboarding,
            Err(e) => return self.say(&format!("Onboarding failed: {e}")),
        };

        self.say(&format!(
            "Patient onboarded. Medical ID: {}",
            onboarding.medical_id
        ))?;
        match onboarding.artifacts {
            Ok(artifacts) => {
                self.say(&format!("QR code saved to {}", artifacts.qr_path.display()))?;
                self.say(&format!("ID file saved to {}", artifacts.id_path.display()))
            }
            Err(e) => self.say(&format!("Warning: could not save ID files: {e}")),
        }
    }

    fn onboard_worker(&mut self) -> KioskResult<()> {
        self.say("\n--- Health Worker Onboarding ---")?;
        let name = self.ask_field(Field::Name)?;
        let email = self.ask_field(Field::Email)?;
        let password = self.ask_field(Field::Password)?;
        let birth_date = self.ask_field(Field::BirthDate)?;
        let specialty = loop {
            self.list_specialties()?;
            let raw = self.ask("Enter specialty code: ")?;
            match Specialty::from_code(&raw) {
                Some(specialty) => break specialty,
                None => self.say("Invalid specialty. Please try again.")?,
            }
        };

        let form = WorkerForm {
            name,
            email,
            password,
            birth_date,
            specialty,
        };
        let message = match self.session.onboard_worker(form) {
            Ok(worker) => format!(
                "Health worker {} registered as {} ({}).",
                worker.name(),
                worker.role(),
                worker.specialty()
            ),
            Err(e) => format!("Onboarding failed: {e}"),
        };
        self.say(&message)
    }

    fn search_workers(&mut self) -> KioskResult<()> {
        self.list_specialties()?;
        let raw = self.ask("Enter specialty code: ")?;
        let Some(specialty) = Specialty::from_code(&raw) else {
            return self.say("Invalid specialty.");
        };

        let workers = self.session.workers_for(specialty);
        if workers.is_empty() {
            return writeln!(
                self.output,
                "No health workers registered under {specialty}."
            )
            .map_err(KioskError::Console);
        }

        writeln!(self.output, "Health workers under {specialty}:").map_err(KioskError::Console)?;
        for worker in workers {
            writeln!(
                self.output,
                "- {} ({}, {})",
                worker.name(),
                worker.role(),
                worker.email()
            )
            .map_err(KioskError::Console)?;
        }
        Ok(())
    }

    fn scan_id(&mut self) -> KioskResult<()> {
        let raw = self.ask("Scan or enter Medical ID: ")?;
        let Some(id) = self.resolve_patient_id(&raw) else {
            return self.say("Patient not found");
        };
        let Some(patient) = self.session.patient(&id) else {
            return self.say("Patient not found");
        };
        write_patient_record(&mut self.output, patient).map_err(KioskError::Console)
    }

    fn match_patient(&mut self) -> KioskResult<()> {
        let raw = self.ask("Enter patient Medical ID: ")?;
        let Some(id) = self.resolve_patient_id(&raw) else {
            return self.say("Patient not found");
        };
        if self.session.patient(&id).is_none() {
            return self.say("Patient not found");
        }

        self.list_specialties()?;
        let raw = self.ask("Enter specialty code: ")?;
        let Some(specialty) = Specialty::from_code(&raw) else {
            return self.say("Invalid specialty.");
        };
        let Some(worker) = self.session.first_worker(specialty) else {
            return self.say(&format!("No health workers available for {specialty}."));
        };
        let matched = format!(
            "Matched with {} ({}, {}).",
            worker.name(),
            worker.role(),
            worker.specialty()
        );
        self.say(&matched)?;

        let symptom = self.ask("Describe your main symptom: ")?;
        let mut answers = ConsoleAnswers {
            input: &mut self.input,
            output: &mut self.output,
        };
        let outcome = self
            .session
            .match_and_diagnose(&id, specialty, &symptom, &mut answers)?;

        match outcome {
            MatchOutcome::PatientNotFound => self.say("Patient not found"),
            MatchOutcome::NoWorker(specialty) => {
                self.say(&format!("No health workers available for {specialty}."))
            }
            MatchOutcome::Examined { outcome, .. } => match outcome {
                DiagnosticOutcome::Diagnosed(entry) => {
                    self.say(&format!("Diagnosis: {}", entry.diagnosis))
                }
                DiagnosticOutcome::NoFlow { symptom } => self.say(&format!(
                    "No diagnostic flow available for '{symptom}'."
                )),
                DiagnosticOutcome::NoSymptom => self.say("No symptom reported."),
            },
        }
    }

    fn view_audit(&mut self) -> KioskResult<()> {
        let entries = self.session.audit_log().entries();
        if entries.is_empty() {
            return writeln!(self.output, "No login events recorded.").map_err(KioskError::Console);
        }

        writeln!(self.output, "--- Login Audit Log ---").map_err(KioskError::Console)?;
        for entry in entries {
            writeln!(
                self.output,
                "[{}] {}: {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.role,
                entry.username
            )
            .map_err(KioskError::Console)?;
        }
        Ok(())
    }

    fn list_specialties(&mut self) -> KioskResult<()> {
        writeln!(self.output, "Specialties:").map_err(KioskError::Console)?;
        for specialty in Specialty::all() {
            writeln!(self.output, "{}. {}", specialty.code(), specialty.name())
                .map_err(KioskError::Console)?;
        }
        Ok(())
    }

    /// Reads a free-text field, re-prompting on validation failure when strict input is on.
    fn ask_field(&mut self, field: Field) -> KioskResult<String> {
        loop {
            let value = self.ask(field.prompt())?;
            if !self.session.config().strict_input() {
                return Ok(value);
            }
            match field.validate(&value) {
                Ok(()) => return Ok(value.trim().to_string()),
                Err(e) => self.say(&format!("Invalid {}: {e}", field.label()))?,
            }
        }
    }

    fn resolve_patient_id(&self, raw: &str) -> Option<MedicalId> {
        match MedicalId::parse(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!("unreadable medical id: {}", e);
                None
            }
        }
    }

    fn ask(&mut self, label: &str) -> KioskResult<String> {
        prompt(&mut self.input, &mut self.output, label)
    }

    fn say(&mut self, line: &str) -> KioskResult<()> {
        writeln!(self.output, "{line}").map_err(KioskError::Console)
    }
}

fn write_patient_record<W: Write>(out: &mut W, patient: &Patient) -> std::io::Result<()> {
    writeln!(out, "--- Patient Record ---")?;
    writeln!(out, "Medical ID: {}", patient.medical_id())?;
    writeln!(out, "Name: {}", patient.name)?;
    writeln!(out, "Email: {}", patient.email)?;
    writeln!(out, "Password: {}", patient.password)?;
    writeln!(out, "Date of Birth: {}", patient.birth_date)?;
    writeln!(
        out,
        "Current Symptom: {}",
        patient.symptom().unwrap_or("None")
    )?;

    writeln!(out, "Answers:")?;
    if patient.answers().is_empty() {
        writeln!(out, "  None")?;
    }
    for qa in patient.answers() {
        writeln!(out, "  {}: {}", qa.question, qa.answer)?;
    }

    writeln!(out, "Diagnosis History:")?;
    if patient.history().is_empty() {
        writeln!(out, "  None")?;
    }
    for (n, entry) in patient.history().iter().enumerate() {
        writeln!(
            out,
            "  {}. [{}] {}: {}",
            n + 1,
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            entry.symptom,
            entry.diagnosis
        )?;
        for qa in &entry.answers {
            writeln!(out, "     {}: {}", qa.question, qa.answer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KioskConfig;
    use crate::directory::lookup_flow;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn run_script(output_dir: &Path, strict: bool, script: &str) -> (Session, String) {
        let cfg = KioskConfig::new(output_dir.to_path_buf(), strict)
            .expect("KioskConfig::new should succeed");
        let session = Session::new(Arc::new(cfg));
        let mut kiosk = Kiosk::new(session, Cursor::new(script.to_string()), Vec::new());

        kiosk.run().expect("kiosk should run to completion");

        let (session, output) = kiosk.into_parts();
        (session, String::from_utf8(output).expect("output should be UTF-8"))
    }

    fn only_patient_id(session: &Session) -> MedicalId {
        let entries = session.audit_log().entries();
        assert_eq!(entries.len(), 1);
        // The only way to get at the id from outside is the artefact file.
        let text = std::fs::read_to_string(
            session
                .config()
                .output_dir()
                .join(format!("{}_ID.txt", entries[0].username)),
        )
        .expect("ID file should exist");
        MedicalId::parse(text.trim_start_matches("Patient ID: ")).expect("ID file holds an id")
    }

    #[test]
    fn exit_ends_session() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (session, output) = run_script(temp_dir.path(), false, "1\n7\n");

        assert!(output.contains("=== Health-Link Kiosk ==="));
        assert!(output.contains("--- Main Menu (Patient) ---"));
        assert!(output.contains("Goodbye!"));
        assert!(session.audit_log().is_empty());
    }

    #[test]
    fn end_of_input_ends_session_cleanly() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (_session, output) = run_script(temp_dir.path(), false, "2\n");

        assert!(output.contains("--- Main Menu (Health Worker) ---"));
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn invalid_choices_reprompt_without_side_effects() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (session, output) = run_script(temp_dir.path(), false, "9\n1\nabc\n0\n7\n");

        assert_eq!(output.matches("Invalid choice. Please try again.").count(), 3);
        assert!(session.audit_log().is_empty());
        assert_eq!(session.patient_count(), 0);
    }

    #[test]
    fn onboarding_patient_writes_artifacts_and_audit_entry() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = "1\n1\nAda\nada@example.com\npw\n1990-01-15\n7\n";
        let (session, output) = run_script(temp_dir.path(), false, script);

        let id = only_patient_id(&session);
        assert!(output.contains(&format!("Patient onboarded. Medical ID: {id}")));
        assert!(temp_dir.path().join("Ada_QR.png").is_file());
        assert_eq!(session.audit_log().entries()[0].role, "Patient");
    }

    #[test]
    fn lax_onboarding_accepts_empty_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = "1\n1\nBlank\n\n\nnot a date\n7\n";
        let (session, _output) = run_script(temp_dir.path(), false, script);

        let id = only_patient_id(&session);
        let patient = session.patient(&id).expect("patient registered");
        assert_eq!(patient.email, "");
        assert_eq!(patient.birth_date, "not a date");
    }

    #[test]
    fn strict_onboarding_reprompts_invalid_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = "1\n1\n \nAda\nada\nada@example.com\npw\n15/01/1990\n1990-01-15\n7\n";
        let (session, output) = run_script(temp_dir.path(), true, script);

        assert!(output.contains("Invalid name:"));
        assert!(output.contains("Invalid email:"));
        assert!(output.contains("Invalid date of birth:"));

        let id = only_patient_id(&session);
        let patient = session.patient(&id).expect("patient registered");
        assert_eq!(patient.email, "ada@example.com");
        assert_eq!(patient.birth_date, "1990-01-15");
    }

    #[test]
    fn worker_onboarding_and_search() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = concat!(
            "2\n",
            "2\nSam\nsam@clinic.org\npw\n1980-05-05\n9\n6\n",
            "3\n6\n",
            "3\n4\n",
            "3\nx\n",
            "7\n"
        );
        let (session, output) = run_script(temp_dir.path(), false, script);

        assert!(output.contains("Invalid specialty. Please try again."));
        assert!(output.contains("Health worker Sam registered as Nurse (Nurse)."));
        assert!(output.contains("Health workers under Nurse:"));
        assert!(output.contains("- Sam (Nurse, sam@clinic.org)"));
        assert!(output.contains("No health workers registered under Pediatrician."));
        assert!(output.contains("Invalid specialty."));
        assert_eq!(session.workers_for(Specialty::Nurse).len(), 1);
        assert_eq!(session.audit_log().entries()[0].role, "Nurse");
    }

    #[test]
    fn scan_unknown_or_malformed_id_reports_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = format!("1\n4\n{}\n4\nnot-an-id\n7\n", MedicalId::new());
        let (_session, output) = run_script(temp_dir.path(), false, &script);

        assert_eq!(output.matches("Patient not found").count(), 2);
        assert!(!output.contains("--- Patient Record ---"));
    }

    #[test]
    fn match_runs_diagnosis_and_scan_shows_full_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = KioskConfig::new(temp_dir.path().to_path_buf(), false).unwrap();
        let mut session = Session::new(Arc::new(cfg));
        let id = session
            .onboard_patient(PatientForm {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "hunter2".into(),
                birth_date: "1990-01-15".into(),
            })
            .unwrap()
            .medical_id;
        session
            .onboard_worker(WorkerForm {
                name: "Lee".into(),
                email: "lee@clinic.org".into(),
                password: "pw".into(),
                birth_date: "1970-07-07".into(),
                specialty: Specialty::GeneralPractitioner,
            })
            .unwrap();

        let script = format!("1\n5\n{id}\n1\nFever\nyes\nperhaps\nno\ny\n4\n{id}\n7\n");
        let mut kiosk = Kiosk::new(session, Cursor::new(script), Vec::new());
        kiosk.run().expect("kiosk should run");
        let (session, output) = kiosk.into_parts();
        let output = String::from_utf8(output).unwrap();

        let fever = lookup_flow("fever").unwrap();
        assert!(output.contains("Matched with Lee (Doctor, General Practitioner)."));
        for question in fever.questions {
            assert!(output.contains(&format!("{question} (yes/no): ")));
        }
        assert!(output.contains("Please answer yes or no."));
        assert!(output.contains(&format!("Diagnosis: {}", fever.diagnosis)));

        assert!(output.contains("--- Patient Record ---"));
        assert!(output.contains("Password: hunter2"));
        assert!(output.contains("Current Symptom: Fever"));
        assert!(output.contains(&format!("{}: no", fever.questions[1])));

        let patient = session.patient(&id).unwrap();
        assert_eq!(patient.history().len(), 1);
        let answers: Vec<Answer> = patient.answers().iter().map(|qa| qa.answer).collect();
        assert_eq!(answers, vec![Answer::Yes, Answer::No, Answer::Yes]);
    }

    #[test]
    fn match_with_unknown_symptom_reports_no_flow() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = KioskConfig::new(temp_dir.path().to_path_buf(), false).unwrap();
        let mut session = Session::new(Arc::new(cfg));
        let id = session
            .onboard_patient(PatientForm {
                name: "Ada".into(),
                ..PatientForm::default()
            })
            .unwrap()
            .medical_id;
        session
            .onboard_worker(WorkerForm {
                name: "Kim".into(),
                email: String::new(),
                password: String::new(),
                birth_date: String::new(),
                specialty: Specialty::Dentist,
            })
            .unwrap();

        let script = format!("2\n5\n{id}\n2\nrash\n7\n");
        let mut kiosk = Kiosk::new(session, Cursor::new(script), Vec::new());
        kiosk.run().expect("kiosk should run");
        let (session, output) = kiosk.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("No diagnostic flow available for 'rash'."));
        assert!(session.patient(&id).unwrap().history().is_empty());
    }

    #[test]
    fn match_without_worker_stops_before_symptom() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = KioskConfig::new(temp_dir.path().to_path_buf(), false).unwrap();
        let mut session = Session::new(Arc::new(cfg));
        let id = session
            .onboard_patient(PatientForm {
                name: "Ada".into(),
                ..PatientForm::default()
            })
            .unwrap()
            .medical_id;

        let script = format!("1\n5\n{id}\n3\n7\n");
        let mut kiosk = Kiosk::new(session, Cursor::new(script), Vec::new());
        kiosk.run().expect("kiosk should run");
        let (session, output) = kiosk.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("No health workers available for Surgeon."));
        assert!(!output.contains("Describe your main symptom"));
        assert_eq!(session.patient(&id).unwrap().symptom(), None);
    }

    #[test]
    fn audit_view_lists_entries_in_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = concat!(
            "1\n",
            "6\n",
            "1\nAda\n\n\n\n",
            "2\nLee\n\n\n\n3\n",
            "6\n",
            "7\n"
        );
        let (_session, output) = run_script(temp_dir.path(), false, script);

        assert!(output.contains("No login events recorded."));
        let patient_at = output.find("] Patient: Ada").expect("patient entry listed");
        let doctor_at = output.find("] Doctor: Lee").expect("doctor entry listed");
        assert!(patient_at < doctor_at);
    }
}
