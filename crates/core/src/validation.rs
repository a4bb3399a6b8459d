//! Onboarding field validation.
//!
//! The kiosk accepts any text by default. With strict input enabled each field is checked
//! here before it is stored, and the kiosk re-prompts the single field that failed.

use crate::KioskResult;
use hl_types::{BirthDate, EmailAddress, NonEmptyText};

/// A free-text field collected during onboarding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    BirthDate,
}

impl Field {
    /// Prompt text shown at the kiosk.
    pub fn prompt(self) -> &'static str {
        match self {
            Field::Name => "Full name: ",
            Field::Email => "Email: ",
            Field::Password => "Password: ",
            Field::BirthDate => "Date of birth (YYYY-MM-DD): ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::BirthDate => "date of birth",
        }
    }

    /// Validates `value` for this field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KioskError::Text`] describing the first rule the value breaks.
    pub fn validate(self, value: &str) -> KioskResult<()> {
        match self {
            Field::Name | Field::Password => {
                NonEmptyText::new(value)?;
            }
            Field::Email => {
                EmailAddress::parse(value)?;
            }
            Field::BirthDate => {
                BirthDate::parse(value)?;
            }
        }
        Ok(())
    }
}
