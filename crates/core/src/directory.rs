//! Static directory data: medical specialties and symptom flows.
//!
//! Both tables are fixed at compile time and read-only. A lookup with an unknown key is not an
//! error; callers get `None` and decide what to print.

use serde::Serialize;
use std::fmt;

/// One of the seven specialties a health worker can register under.
///
/// Declaration order matches the kiosk's numbered codes, so `Ord` sorts by code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Specialty {
    GeneralPractitioner,
    Dentist,
    Surgeon,
    Pediatrician,
    Cardiologist,
    Nurse,
    Admin,
}

const ALL_SPECIALTIES: [Specialty; 7] = [
    Specialty::GeneralPractitioner,
    Specialty::Dentist,
    Specialty::Surgeon,
    Specialty::Pediatrician,
    Specialty::Cardiologist,
    Specialty::Nurse,
    Specialty::Admin,
];

impl Specialty {
    /// All specialties in code order.
    pub fn all() -> &'static [Specialty] {
        &ALL_SPECIALTIES
    }

    /// Menu code shown at the kiosk (`"1"` to `"7"`).
    pub fn code(self) -> &'static str {
        match self {
            Specialty::GeneralPractitioner => "1",
            Specialty::Dentist => "2",
            Specialty::Surgeon => "3",
            Specialty::Pediatrician => "4",
            Specialty::Cardiologist => "5",
            Specialty::Nurse => "6",
            Specialty::Admin => "7",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Specialty::GeneralPractitioner => "General Practitioner",
            Specialty::Dentist => "Dentist",
            Specialty::Surgeon => "Surgeon",
            Specialty::Pediatrician => "Pediatrician",
            Specialty::Cardiologist => "Cardiologist",
            Specialty::Nurse => "Nurse",
            Specialty::Admin => "Admin",
        }
    }

    /// Resolve a menu code. Surrounding whitespace is ignored.
    pub fn from_code(code: &str) -> Option<Specialty> {
        let code = code.trim();
        ALL_SPECIALTIES.iter().copied().find(|s| s.code() == code)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed question list and diagnosis text for one symptom keyword.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticFlow {
    pub symptom: &'static str,
    pub questions: &'static [&'static str],
    pub diagnosis: &'static str,
}

static FLOWS: [DiagnosticFlow; 3] = [
    DiagnosticFlow {
        symptom: "fever",
        questions: &[
            "Is your temperature above 38°C?",
            "Have you had chills or night sweats?",
            "Has the fever lasted more than three days?",
        ],
        diagnosis: "Possible viral infection. Rest, drink plenty of fluids and see a \
                    General Practitioner if the fever persists.",
    },
    DiagnosticFlow {
        symptom: "headache",
        questions: &[
            "Did the headache start suddenly or is it severe?",
            "Are you sensitive to light or noise?",
            "Have you felt nauseous or vomited?",
        ],
        diagnosis: "Possible migraine or tension headache. Rest in a quiet, dark room and \
                    seek care if the pain worsens.",
    },
    DiagnosticFlow {
        symptom: "cough",
        questions: &[
            "Have you been coughing for more than two weeks?",
            "Are you coughing up mucus or blood?",
            "Do you feel short of breath?",
        ],
        diagnosis: "Possible respiratory infection. Monitor your breathing and book a chest \
                    examination with a General Practitioner.",
    },
];

/// Look up the flow for a reported symptom.
///
/// The symptom is trimmed and lowercased first, so `" Fever "` finds the fever flow.
pub fn lookup_flow(symptom: &str) -> Option<&'static DiagnosticFlow> {
    let key = symptom.trim().to_lowercase();
    FLOWS.iter().find(|flow| flow.symptom == key)
}

/// Every flow, in a stable order.
pub fn flows() -> &'static [DiagnosticFlow] {
    &FLOWS
}

/// Symptom keywords that have a flow.
pub fn symptoms() -> impl Iterator<Item = &'static str> {
    FLOWS.iter().map(|flow| flow.symptom)
}
