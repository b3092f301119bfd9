use anyhow::anyhow;
use classroll_core::errors::{StoreViolation, store_violation};
use classroll_core::{AppError, PageRequest, check_password_strength, hash_password};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::auth::service::normalize_email;
use crate::modules::students::model::{
    BOOTSTRAP_ADMIN_ID, CreateStudentDto, NationalId, NationalIdError, StudentResponse,
    UpdateStudentDto,
};

const STUDENT_COLUMNS: &str = "id, name, birth_date, national_id, email, is_admin";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(
        db: &PgPool,
        dto: CreateStudentDto,
    ) -> Result<StudentResponse, AppError> {
        let national_id = parse_national_id(&dto.national_id)?;
        check_password_strength(&dto.password)?;
        let password_hash = hash_password(&dto.password)?;

        let student = sqlx::query_as::<_, StudentResponse>(&format!(
            "INSERT INTO students (name, birth_date, national_id, email, password_hash, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.birth_date)
        .bind(national_id.as_str())
        .bind(normalize_email(&dto.email))
        .bind(&password_hash)
        .bind(dto.is_admin)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        info!(student_id = student.id, "Student created");
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: i32) -> Result<StudentResponse, AppError> {
        sqlx::query_as::<_, StudentResponse>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(student_not_found)
    }

    /// Case-insensitive name filter, ordered by name then id.
    ///
    /// The count and the page are read in one transaction so `total` matches
    /// the rows the page was cut from.
    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<StudentResponse>, i64), AppError> {
        let pattern = search.map(|term| format!("%{}%", escape_like(term)));

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        let students = sqlx::query_as::<_, StudentResponse>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE ($1::text IS NULL OR name ILIKE $1)
             ORDER BY name ASC, id ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(page.page_size())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok((students, total))
    }

    /// Every rule is checked before the row is touched, so a rejected update
    /// leaves the record exactly as it was.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: i32,
        dto: UpdateStudentDto,
    ) -> Result<StudentResponse, AppError> {
        if id == BOOTSTRAP_ADMIN_ID && dto.is_admin == Some(false) {
            return Err(AppError::forbidden(
                "The bootstrap administrator cannot be demoted",
            ));
        }

        let national_id = parse_national_id(&dto.national_id)?;

        let password_hash = match dto.new_password() {
            Some(password) => {
                check_password_strength(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        let student = sqlx::query_as::<_, StudentResponse>(&format!(
            "UPDATE students
             SET name = $1,
                 birth_date = $2,
                 national_id = $3,
                 email = $4,
                 password_hash = COALESCE($5, password_hash),
                 is_admin = COALESCE($6, is_admin),
                 updated_at = NOW()
             WHERE id = $7
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.birth_date)
        .bind(national_id.as_str())
        .bind(normalize_email(&dto.email))
        .bind(password_hash)
        .bind(dto.is_admin)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(student_not_found)?;

        info!(student_id = id, "Student updated");
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: i32) -> Result<(), AppError> {
        if id == BOOTSTRAP_ADMIN_ID {
            return Err(AppError::forbidden(
                "The bootstrap administrator cannot be deleted",
            ));
        }

        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                let mapped = match store_violation(&e) {
                    Some(StoreViolation::ForeignKey(_)) => Some(AppError::conflict(anyhow!(
                        "Student still has enrollments"
                    ))),
                    _ => None,
                };
                mapped.unwrap_or_else(|| AppError::database(e))
            })?;

        if result.rows_affected() == 0 {
            return Err(student_not_found());
        }

        info!(student_id = id, "Student deleted");
        Ok(())
    }
}

fn student_not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found"))
}

fn parse_national_id(raw: &str) -> Result<NationalId, AppError> {
    NationalId::parse(raw).map_err(|e| match e {
        NationalIdError::InvalidFormat => {
            AppError::invalid_argument(anyhow!("Invalid national ID format"))
                .with_field("national_id", e.to_string())
        }
        NationalIdError::InvalidChecksum => AppError::invalid_checksum(),
    })
}

fn map_write_error(e: sqlx::Error) -> AppError {
    let mapped = match store_violation(&e) {
        Some(StoreViolation::Unique("students_national_id_key")) => Some(
            AppError::conflict(anyhow!("National ID already registered"))
                .with_field("national_id", "national_id is already registered"),
        ),
        Some(StoreViolation::Unique("students_email_key")) => Some(
            AppError::conflict(anyhow!("Email already registered"))
                .with_field("email", "email is already registered"),
        ),
        Some(StoreViolation::Unique(_)) => {
            Some(AppError::conflict(anyhow!("Student already exists")))
        }
        Some(StoreViolation::Check(_)) => {
            Some(AppError::invalid_argument(anyhow!("Invalid student data")))
        }
        _ => None,
    };
    mapped.unwrap_or_else(|| AppError::database(e))
}

/// Escapes `%`, `_` and the escape character itself so user input matches
/// literally inside an `ILIKE` pattern.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
