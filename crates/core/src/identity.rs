//! Medical ID artefacts.
//!
//! Each onboarded patient gets two files in the output directory, both named after the
//! patient:
//!
//! ```text
//! <output_dir>/
//!   <name>_QR.png   # QR code encoding the Medical ID
//!   <name>_ID.txt   # "Patient ID: <medical id>"
//! ```
//!
//! File names are not checked for uniqueness. Two patients with the same name overwrite each
//! other's artefacts, which matches the kiosk's historical behaviour. Names containing a path
//! separator are refused so artefacts never land outside the output directory.

use crate::constants::{ID_FILE_PREFIX, ID_FILE_SUFFIX, QR_FILE_SUFFIX};
use crate::{KioskError, KioskResult};
use hl_uuid::MedicalId;
use image::Luma;
use qrcode::QrCode;
use std::fs;
use std::path::PathBuf;

/// Paths written for one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdArtifacts {
    pub qr_path: PathBuf,
    pub id_path: PathBuf,
}

/// Writes Medical ID artefacts into a fixed output directory.
#[derive(Clone, Debug)]
pub struct IdentityIssuer {
    output_dir: PathBuf,
}

impl IdentityIssuer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn qr_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}{QR_FILE_SUFFIX}"))
    }

    pub fn id_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}{ID_FILE_SUFFIX}"))
    }

    /// Renders the QR image and writes the ID text file for `name`.
    ///
    /// Existing files at either path are overwritten. Nothing is rolled back if the second
    /// write fails after the first succeeded.
    ///
    /// # Errors
    ///
    /// Returns `KioskError` if:
    /// - `name` contains `/` or `\` (`InvalidInput`, nothing is written),
    /// - the output directory cannot be created,
    /// - the Medical ID cannot be encoded as a QR code,
    /// - the PNG or the text file cannot be written.
    pub fn issue(&self, name: &str, id: &MedicalId) -> KioskResult<IdArtifacts> {
        if name.contains(['/', '\\']) {
            return Err(KioskError::InvalidInput(format!(
                "patient name '{name}' cannot be used in a file name"
            )));
        }
        fs::create_dir_all(&self.output_dir).map_err(KioskError::OutputDirCreation)?;

        let payload = id.to_string();
        let code = QrCode::new(payload.as_bytes()).map_err(KioskError::QrEncode)?;
        let image = code.render::<Luma<u8>>().build();

        let qr_path = self.qr_path(name);
        image.save(&qr_path).map_err(KioskError::ImageWrite)?;

        let id_path = self.id_path(name);
        fs::write(&id_path, format!("{ID_FILE_PREFIX}{payload}"))
            .map_err(KioskError::FileWrite)?;

        tracing::debug!(
            qr = %qr_path.display(),
            id = %id_path.display(),
            "medical id artefacts written"
        );

        Ok(IdArtifacts { qr_path, id_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn issue_writes_both_artifacts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let issuer = IdentityIssuer::new(temp_dir.path());
        let id = MedicalId::new();

        let artifacts = issuer.issue("Ada", &id).expect("issue should succeed");

        assert_eq!(artifacts.qr_path, temp_dir.path().join("Ada_QR.png"));
        assert_eq!(artifacts.id_path, temp_dir.path().join("Ada_ID.txt"));
        assert!(artifacts.qr_path.is_file());

        let text = fs::read_to_string(&artifacts.id_path).expect("should read ID file");
        assert_eq!(text, format!("Patient ID: {id}"));
    }

    #[test]
    fn qr_artifact_decodes_to_medical_id() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let issuer = IdentityIssuer::new(temp_dir.path());
        let id = MedicalId::new();

        let artifacts = issuer.issue("Fay", &id).expect("issue should succeed");

        let luma = image::open(&artifacts.qr_path)
            .expect("QR file should be a valid image")
            .to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(luma);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_, content) = grids[0].decode().expect("QR code should decode");
        assert_eq!(content, id.to_string());
    }

    #[test]
    fn names_with_path_separators_are_refused() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let out = temp_dir.path().join("out");
        let issuer = IdentityIssuer::new(&out);

        for name in ["../escape", "nested/name", "back\\slash"] {
            let err = issuer
                .issue(name, &MedicalId::new())
                .expect_err("path-like name should be refused");
            assert!(matches!(err, KioskError::InvalidInput(_)));
        }
        assert!(!out.exists());
        assert!(!temp_dir.path().join("escape_ID.txt").exists());
    }

    #[test]
    fn qr_artifact_is_a_square_png() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let issuer = IdentityIssuer::new(temp_dir.path());

        let artifacts = issuer
            .issue("Ben", &MedicalId::new())
            .expect("issue should succeed");

        let decoded = image::open(&artifacts.qr_path).expect("QR file should be a valid image");
        assert!(decoded.width() > 0);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn issue_creates_missing_output_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("ids").join("today");
        let issuer = IdentityIssuer::new(&nested);

        issuer
            .issue("Cy", &MedicalId::new())
            .expect("issue should create the directory");

        assert!(nested.join("Cy_ID.txt").is_file());
    }

    #[test]
    fn same_name_overwrites_previous_artifacts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let issuer = IdentityIssuer::new(temp_dir.path());
        let first = MedicalId::new();
        let second = MedicalId::new();

        issuer.issue("Dee", &first).expect("first issue");
        issuer.issue("Dee", &second).expect("second issue");

        let text = fs::read_to_string(issuer.id_path("Dee")).expect("should read ID file");
        assert_eq!(text, format!("Patient ID: {second}"));
    }

    #[test]
    fn issue_fails_when_output_dir_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("should write blocker file");

        let err = IdentityIssuer::new(&blocker)
            .issue("Eve", &MedicalId::new())
            .expect_err("issue should fail");
        assert!(matches!(err, KioskError::OutputDirCreation(_)));
    }
}
