//! Bootstrap administrator provisioning.
//!
//! The API never creates the first administrator. It is inserted here with
//! the reserved id 1, which the student registry refuses to delete.

use chrono::NaiveDate;
use classroll_core::errors::{StoreViolation, store_violation};
use classroll_core::password::{hash_password, is_strong_password};
use classroll_models::national_id::NationalId;
use classroll_models::students::StudentResponse;
use classroll_models::validation::{validate_display_name, validate_email_address};
use sqlx::PgPool;
use validator::ValidationError;

use crate::CliResult;

pub use classroll_models::BOOTSTRAP_ADMIN_ID;

#[derive(Debug, Clone)]
pub struct AdminInput {
    pub name: String,
    pub birth_date: NaiveDate,
    pub national_id: String,
    pub email: String,
    pub password: String,
}

/// Applies the same rules the API applies to a new student.
///
/// Returns the normalized national ID on success.
pub fn validate_admin_input(input: &AdminInput) -> Result<NationalId, String> {
    validate_display_name(&input.name).map_err(rule_message)?;

    let national_id = NationalId::parse(&input.national_id).map_err(|e| e.to_string())?;

    validate_email_address(&input.email).map_err(rule_message)?;

    if !is_strong_password(&input.password) {
        return Err(
            "Weak password. It must have at least 8 characters, with uppercase, lowercase, digit and symbol."
                .to_string(),
        );
    }

    Ok(national_id)
}

fn rule_message(err: ValidationError) -> String {
    err.message
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

/// Inserts the bootstrap administrator. Fails if id 1 is already taken.
pub async fn create_admin(db: &PgPool, input: &AdminInput) -> CliResult<StudentResponse> {
    let national_id = validate_admin_input(input)?;
    let password_hash =
        hash_password(&input.password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let inserted = sqlx::query_as::<_, StudentResponse>(
        r#"INSERT INTO students (id, name, birth_date, national_id, email, password_hash, is_admin)
           VALUES ($1, $2, $3, $4, $5, $6, TRUE)
           ON CONFLICT (id) DO NOTHING
           RETURNING id, name, birth_date, national_id, email, is_admin"#,
    )
    .bind(BOOTSTRAP_ADMIN_ID)
    .bind(input.name.trim())
    .bind(input.birth_date)
    .bind(national_id.as_str())
    .bind(input.email.trim().to_lowercase())
    .bind(&password_hash)
    .fetch_optional(db)
    .await;

    match inserted {
        Ok(Some(admin)) => Ok(admin),
        Ok(None) => Err("The bootstrap administrator (id 1) already exists".into()),
        Err(e) => match store_violation(&e) {
            Some(StoreViolation::Unique(_)) => {
                Err("A student with this national ID or email already exists".into())
            }
            _ => Err(e.into()),
        },
    }
}
