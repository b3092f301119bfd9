//! Demo data seeding.
//!
//! Seeded students use addresses under [`SEED_EMAIL_DOMAIN`], a domain the
//! seeder owns, and seeded sections carry
//! [`SEED_MARKER`] in their description, which is how `clear_all` finds them
//! again. The bootstrap administrator is never touched.

mod enrollments;
mod sections;
mod students;

use std::time::Instant;

use sqlx::PgPool;

use crate::CliResult;
use crate::admin::BOOTSTRAP_ADMIN_ID;

pub use enrollments::{generate_enrollments, seed_enrollments};
pub use sections::{generate_sections, seed_sections};
pub use students::{generate_students, seed_students};

pub const SEED_EMAIL_DOMAIN: &str = "seed.classroll.test";
pub const SEED_MARKER: &str = "(seed)";
/// Password shared by every seeded student.
pub const SEED_PASSWORD: &str = "Student@123";

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub students: usize,
    pub sections: usize,
    /// Upper bound; a student is never enrolled twice in the same section.
    pub enrollments_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 50,
            sections: 6,
            enrollments_per_student: 2,
        }
    }
}

impl SeedConfig {
    pub fn new(students: usize) -> Self {
        Self {
            students,
            ..Default::default()
        }
    }

    pub fn with_sections(mut self, sections: usize) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_enrollments_per_student(mut self, enrollments: usize) -> Self {
        self.enrollments_per_student = enrollments;
        self
    }
}

pub struct StudentSeed {
    pub name: String,
    pub birth_date: chrono::NaiveDate,
    pub national_id: String,
    pub email: String,
}

pub struct SectionSeed {
    pub name: String,
    pub description: String,
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> CliResult<()> {
    let start_time = Instant::now();
    println!("Starting database seeding...");
    println!("   - Students: {}", config.students);
    println!("   - Sections: {}", config.sections);
    println!(
        "   - Enrollments per student: up to {}",
        config.enrollments_per_student
    );

    // Cost 4 keeps seeding fast; these accounts are demo data only.
    let password_hash = bcrypt::hash(SEED_PASSWORD, 4)?;

    let student_ids = seed_students(db, config.students, &password_hash).await?;
    let section_ids = seed_sections(db, config.sections).await?;
    let enrolled = seed_enrollments(
        db,
        &student_ids,
        &section_ids,
        config.enrollments_per_student,
    )
    .await?;

    println!(
        "\nSeeded {} students, {} sections and {} enrollments in {:?}",
        student_ids.len(),
        section_ids.len(),
        enrolled,
        start_time.elapsed()
    );
    println!("   Seeded students log in with password {}", SEED_PASSWORD);

    Ok(())
}

/// `LIKE` pattern matching exactly the seeded addresses. The domain contains
/// no `LIKE` wildcards.
fn seed_email_pattern() -> String {
    format!("%@{}", SEED_EMAIL_DOMAIN)
}

/// Removes seeded sections (cascading to their enrollments), then any
/// remaining enrollments of seeded students, then the seeded students.
pub async fn clear_all(db: &PgPool) -> CliResult<()> {
    let start_time = Instant::now();
    println!("Clearing seeded data...");

    let mut tx = db.begin().await?;

    let sections = sqlx::query("DELETE FROM sections WHERE description LIKE '%' || $1")
        .bind(SEED_MARKER)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let enrollments = sqlx::query(
        r#"DELETE FROM enrollments e
           USING students s
           WHERE e.student_id = s.id AND s.id <> $1 AND s.email LIKE $2"#,
    )
    .bind(BOOTSTRAP_ADMIN_ID)
    .bind(seed_email_pattern())
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let students = sqlx::query("DELETE FROM students WHERE id <> $1 AND email LIKE $2")
        .bind(BOOTSTRAP_ADMIN_ID)
        .bind(seed_email_pattern())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   Deleted {} sections, {} enrollments and {} students in {:?}",
        sections,
        enrollments,
        students,
        start_time.elapsed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_config_builder() {
        let config = SeedConfig::new(10)
            .with_sections(3)
            .with_enrollments_per_student(1);
        assert_eq!(config.students, 10);
        assert_eq!(config.sections, 3);
        assert_eq!(config.enrollments_per_student, 1);
    }

    #[test]
    fn test_seed_email_pattern_is_scoped_to_seed_domain() {
        assert_eq!(seed_email_pattern(), "%@seed.classroll.test");
        assert!(!SEED_EMAIL_DOMAIN.contains(['%', '_']));
    }

    #[test]
    fn test_seed_password_is_strong() {
        assert!(classroll_core::password::is_strong_password(SEED_PASSWORD));
    }
}
