use std::time::Instant;

use rand::seq::SliceRandom;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::CliResult;

const BATCH_SIZE: usize = 5000;

/// Picks up to `per_student` distinct sections for every student.
pub fn generate_enrollments(
    student_ids: &[i32],
    section_ids: &[i32],
    per_student: usize,
) -> Vec<(i32, i32)> {
    let mut rng = rand::thread_rng();
    let per_student = per_student.min(section_ids.len());

    student_ids
        .iter()
        .flat_map(|&student_id| {
            section_ids
                .choose_multiple(&mut rng, per_student)
                .map(move |&section_id| (student_id, section_id))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_enrollments(
    db: &PgPool,
    student_ids: &[i32],
    section_ids: &[i32],
    per_student: usize,
) -> CliResult<u64> {
    let start_time = Instant::now();
    let pairs = generate_enrollments(student_ids, section_ids, per_student);
    println!("Seeding {} enrollments...", pairs.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in pairs.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO enrollments (student_id, section_id) ");
        query.push_values(chunk, |mut row, (student_id, section_id)| {
            row.push_bind(*student_id).push_bind(*section_id);
        });
        query.push(" ON CONFLICT (student_id, section_id) DO NOTHING");

        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   Inserted {} enrollments in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_unique_per_student() {
        let pairs = generate_enrollments(&[2, 3, 4], &[10, 11, 12], 2);
        assert_eq!(pairs.len(), 6);

        let mut sorted = pairs.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), pairs.len());
    }

    #[test]
    fn test_capped_by_available_sections() {
        let pairs = generate_enrollments(&[2], &[10], 5);
        assert_eq!(pairs, vec![(2, 10)]);
    }

    #[test]
    fn test_no_sections_no_pairs() {
        assert!(generate_enrollments(&[2, 3], &[], 2).is_empty());
    }
}
