//! Kiosk runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the session. Core
//! code never reads environment variables itself; the binaries do that and hand over the
//! parsed values.

use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::{KioskError, KioskResult};
use std::path::{Path, PathBuf};

/// Kiosk configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct KioskConfig {
    output_dir: PathBuf,
    strict_input: bool,
}

impl KioskConfig {
    /// Create a new `KioskConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`KioskError::InvalidInput`] if `output_dir` is empty.
    pub fn new(output_dir: PathBuf, strict_input: bool) -> KioskResult<Self> {
        if output_dir.as_os_str().is_empty() {
            return Err(KioskError::InvalidInput(
                "output_dir cannot be empty".into(),
            ));
        }

        Ok(Self {
            output_dir,
            strict_input,
        })
    }

    /// Directory that receives `<name>_QR.png` and `<name>_ID.txt`.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether onboarding fields are validated before being accepted.
    pub fn strict_input(&self) -> bool {
        self.strict_input
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            strict_input: false,
        }
    }
}

/// Resolve the artefact output directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_OUTPUT_DIR`].
pub fn output_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// Parse the strict-input flag from an optional string value.
///
/// Unset or blank means `false`. Accepts `1/true/yes/on` and `0/false/no/off`,
/// case-insensitively.
///
/// # Errors
///
/// Returns [`KioskError::InvalidInput`] for any other value.
pub fn strict_input_from_env_value(value: Option<String>) -> KioskResult<bool> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(KioskError::InvalidInput(format!(
            "strict input flag must be a boolean, got: '{}'",
            other
        ))),
    }
}
