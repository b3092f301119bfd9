//! Custom `validator` rules shared by several DTOs.
//!
//! Names and emails are stored trimmed, so both rules measure the trimmed
//! value against the column widths in the schema.

use std::borrow::Cow;

use validator::{ValidateEmail, ValidationError};

pub const MIN_NAME_LENGTH: usize = 3;
/// Width of the `name` columns.
pub const MAX_NAME_LENGTH: usize = 200;
/// Width of the `students.email` column.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Names must have between 3 and 200 characters once surrounding whitespace
/// is removed.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();

    if length < MIN_NAME_LENGTH {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("name must have at least 3 characters")));
    }
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("name must have at most 200 characters")));
    }

    Ok(())
}

/// Email syntax check on the trimmed address. Surrounding whitespace is
/// accepted here and removed when the address is normalized.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("email must have at most 255 characters")));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("email must be a valid address")));
    }

    Ok(())
}
