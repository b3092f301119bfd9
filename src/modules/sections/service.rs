use anyhow::anyhow;
use classroll_core::errors::{StoreViolation, store_violation};
use classroll_core::{AppError, PageRequest};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::sections::model::{
    CreateSectionDto, EnrolledStudent, Section, SectionDetail, SectionWithCount,
    UpdateSectionDto,
};

pub struct SectionService;

impl SectionService {
    #[instrument(skip(db, dto))]
    pub async fn create_section(db: &PgPool, dto: CreateSectionDto) -> Result<Section, AppError> {
        let section = sqlx::query_as::<_, Section>(
            "INSERT INTO sections (name, description) VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(dto.name.trim())
        .bind(dto.description.trim())
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        info!(section_id = section.id, "Section created");
        Ok(section)
    }

    /// Section with its roster ordered by student name then id.
    #[instrument(skip(db))]
    pub async fn get_section(db: &PgPool, id: i32) -> Result<SectionDetail, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let section = sqlx::query_as::<_, Section>(
            "SELECT id, name, description FROM sections WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(section_not_found)?;

        let students = fetch_roster(&mut *tx, id).await?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(SectionDetail::new(section, students))
    }

    #[instrument(skip(db))]
    pub async fn list_sections(
        db: &PgPool,
        page: PageRequest,
    ) -> Result<(Vec<SectionWithCount>, i64), AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sections")
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;

        let sections = sqlx::query_as::<_, SectionWithCount>(
            "SELECT s.id, s.name, s.description, COUNT(e.id) AS enrollment_count
             FROM sections s
             LEFT JOIN enrollments e ON e.section_id = s.id
             GROUP BY s.id, s.name, s.description
             ORDER BY s.name ASC, s.id ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(page.page_size())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok((sections, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_section(
        db: &PgPool,
        id: i32,
        dto: UpdateSectionDto,
    ) -> Result<Section, AppError> {
        let section = sqlx::query_as::<_, Section>(
            "UPDATE sections SET name = $1, description = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING id, name, description",
        )
        .bind(dto.name.trim())
        .bind(dto.description.trim())
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(section_not_found)?;

        info!(section_id = id, "Section updated");
        Ok(section)
    }

    /// Removes the section and, through the foreign key, its enrollments.
    #[instrument(skip(db))]
    pub async fn delete_section(db: &PgPool, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(section_not_found());
        }

        info!(section_id = id, "Section deleted");
        Ok(())
    }
}

/// Enrolled students of a section, ordered by name then student id.
pub(crate) async fn fetch_roster(
    conn: &mut sqlx::PgConnection,
    section_id: i32,
) -> Result<Vec<EnrolledStudent>, AppError> {
    sqlx::query_as::<_, EnrolledStudent>(
        "SELECT st.id AS student_id, st.name, st.email, e.enrolled_at
         FROM enrollments e
         JOIN students st ON st.id = e.student_id
         WHERE e.section_id = $1
         ORDER BY st.name ASC, st.id ASC",
    )
    .bind(section_id)
    .fetch_all(conn)
    .await
    .map_err(AppError::database)
}

pub(crate) fn section_not_found() -> AppError {
    AppError::not_found(anyhow!("Section not found"))
}

fn map_write_error(e: sqlx::Error) -> AppError {
    let mapped = match store_violation(&e) {
        Some(StoreViolation::Check(_)) => Some(
            AppError::invalid_argument(anyhow!("Invalid section data"))
                .with_field("name", "name must have at least 3 characters"),
        ),
        _ => None,
    };
    mapped.unwrap_or_else(|| AppError::database(e))
}
