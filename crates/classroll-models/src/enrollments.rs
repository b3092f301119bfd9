//! Enrollment models, joined views and section rosters.
//!
//! The list and detail endpoints return nested `student` / `section`
//! objects. The database hands them back as flat rows (`*Row` types), which
//! are converted with `From`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Body for creating or re-pointing an enrollment.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct EnrollmentDto {
    #[validate(range(min = 1, message = "student_id must be a positive id"))]
    pub student_id: i32,
    #[validate(range(min = 1, message = "section_id must be a positive id"))]
    pub section_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub section_id: i32,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionSummaryWithCount {
    pub id: i32,
    pub name: String,
    pub enrollment_count: i64,
}

/// A single enrollment with the student and section it links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDetail {
    pub id: i32,
    pub student: StudentSummary,
    pub section: SectionSummary,
    pub enrolled_at: DateTime<Utc>,
}

/// Item of the enrollment listing. The section carries its own enrollment count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentListItem {
    pub id: i32,
    pub student: StudentSummary,
    pub section: SectionSummaryWithCount,
    pub enrolled_at: DateTime<Utc>,
}

/// A student as seen from a section: who, and since when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EnrolledStudent {
    pub student_id: i32,
    pub name: String,
    pub email: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Students enrolled in one section, ordered by name then student id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionRoster {
    pub section_id: i32,
    pub section_name: String,
    pub students: Vec<EnrolledStudent>,
}

#[derive(Debug, FromRow)]
pub struct EnrollmentDetailRow {
    pub id: i32,
    pub student_id: i32,
    pub student_name: String,
    pub student_email: String,
    pub section_id: i32,
    pub section_name: String,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentDetailRow> for EnrollmentDetail {
    fn from(row: EnrollmentDetailRow) -> Self {
        Self {
            id: row.id,
            student: StudentSummary {
                id: row.student_id,
                name: row.student_name,
                email: row.student_email,
            },
            section: SectionSummary {
                id: row.section_id,
                name: row.section_name,
            },
            enrolled_at: row.enrolled_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct EnrollmentListRow {
    pub id: i32,
    pub student_id: i32,
    pub student_name: String,
    pub student_email: String,
    pub section_id: i32,
    pub section_name: String,
    pub section_enrollment_count: i64,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentListRow> for EnrollmentListItem {
    fn from(row: EnrollmentListRow) -> Self {
        Self {
            id: row.id,
            student: StudentSummary {
                id: row.student_id,
                name: row.student_name,
                email: row.student_email,
            },
            section: SectionSummaryWithCount {
                id: row.section_id,
                name: row.section_name,
                enrollment_count: row.section_enrollment_count,
            },
            enrolled_at: row.enrolled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_rejects_non_positive_ids() {
        let dto = EnrollmentDto {
            student_id: 0,
            section_id: -1,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("student_id"));
        assert!(fields.contains_key("section_id"));

        let ok = EnrollmentDto {
            student_id: 2,
            section_id: 1,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_detail_row_nests_summaries() {
        let row = EnrollmentDetailRow {
            id: 9,
            student_id: 2,
            student_name: "Ana".to_string(),
            student_email: "ana@classroll.dev".to_string(),
            section_id: 4,
            section_name: "Turma A".to_string(),
            enrolled_at: Utc::now(),
        };

        let json = serde_json::to_value(EnrollmentDetail::from(row)).unwrap();
        assert_eq!(json["student"]["id"], 2);
        assert_eq!(json["student"]["email"], "ana@classroll.dev");
        assert_eq!(json["section"]["name"], "Turma A");
        assert!(json["section"].get("enrollment_count").is_none());
    }

    #[test]
    fn test_list_row_carries_section_count() {
        let row = EnrollmentListRow {
            id: 9,
            student_id: 2,
            student_name: "Ana".to_string(),
            student_email: "ana@classroll.dev".to_string(),
            section_id: 4,
            section_name: "Turma A".to_string(),
            section_enrollment_count: 3,
            enrolled_at: Utc::now(),
        };

        let item = EnrollmentListItem::from(row);
        assert_eq!(item.section.enrollment_count, 3);
    }
}
