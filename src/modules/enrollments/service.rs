use anyhow::anyhow;
use classroll_core::AppError;
use classroll_core::errors::{StoreViolation, store_violation};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::enrollments::model::{
    Enrollment, EnrollmentDetail, EnrollmentDetailRow, EnrollmentDto, EnrollmentListItem,
    EnrollmentListRow, SectionRoster,
};
use crate::modules::sections::service::{fetch_roster, section_not_found};

const DETAIL_SELECT: &str = "
    SELECT e.id,
           st.id AS student_id, st.name AS student_name, st.email AS student_email,
           s.id AS section_id, s.name AS section_name,
           e.enrolled_at
    FROM enrollments e
    JOIN students st ON st.id = e.student_id
    JOIN sections s ON s.id = e.section_id";

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db))]
    pub async fn create_enrollment(
        db: &PgPool,
        dto: EnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (student_id, section_id) VALUES ($1, $2)
             RETURNING id, student_id, section_id, enrolled_at",
        )
        .bind(dto.student_id)
        .bind(dto.section_id)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        info!(
            enrollment_id = enrollment.id,
            student_id = dto.student_id,
            section_id = dto.section_id,
            "Enrollment created"
        );
        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn get_enrollment(db: &PgPool, id: i32) -> Result<EnrollmentDetail, AppError> {
        let row = sqlx::query_as::<_, EnrollmentDetailRow>(&format!(
            "{DETAIL_SELECT} WHERE e.id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(enrollment_not_found)?;

        Ok(row.into())
    }

    /// All enrollments ordered by id. Not paginated.
    #[instrument(skip(db))]
    pub async fn list_enrollments(db: &PgPool) -> Result<Vec<EnrollmentListItem>, AppError> {
        let rows = sqlx::query_as::<_, EnrollmentListRow>(
            "SELECT e.id,
                    st.id AS student_id, st.name AS student_name, st.email AS student_email,
                    s.id AS section_id, s.name AS section_name,
                    (SELECT COUNT(*) FROM enrollments c WHERE c.section_id = s.id)
                        AS section_enrollment_count,
                    e.enrolled_at
             FROM enrollments e
             JOIN students st ON st.id = e.student_id
             JOIN sections s ON s.id = e.section_id
             ORDER BY e.id ASC",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(db))]
    pub async fn list_by_section(db: &PgPool, section_id: i32) -> Result<SectionRoster, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let section_name =
            sqlx::query_scalar::<_, String>("SELECT name FROM sections WHERE id = $1")
                .bind(section_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::database)?
                .ok_or_else(section_not_found)?;

        let students = fetch_roster(&mut *tx, section_id).await?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(SectionRoster {
            section_id,
            section_name,
            students,
        })
    }

    /// Repoints an enrollment. `enrolled_at` is left untouched.
    #[instrument(skip(db))]
    pub async fn update_enrollment(
        db: &PgPool,
        id: i32,
        dto: EnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "UPDATE enrollments SET student_id = $1, section_id = $2
             WHERE id = $3
             RETURNING id, student_id, section_id, enrolled_at",
        )
        .bind(dto.student_id)
        .bind(dto.section_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(enrollment_not_found)?;

        info!(enrollment_id = id, "Enrollment updated");
        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn delete_enrollment(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(enrollment_not_found());
        }

        info!(enrollment_id = id, "Enrollment deleted");
        Ok(())
    }
}

fn enrollment_not_found() -> AppError {
    AppError::not_found(anyhow!("Enrollment not found"))
}

fn map_write_error(e: sqlx::Error) -> AppError {
    let mapped = match store_violation(&e) {
        Some(StoreViolation::Unique("enrollments_student_section_key")) => Some(
            AppError::duplicate(anyhow!("Student is already enrolled in this section")),
        ),
        Some(StoreViolation::ForeignKey("enrollments_student_id_fkey")) => {
            Some(AppError::not_found(anyhow!("Student not found")))
        }
        Some(StoreViolation::ForeignKey("enrollments_section_id_fkey")) => {
            Some(section_not_found())
        }
        _ => None,
    };
    mapped.unwrap_or_else(|| AppError::database(e))
}
