use std::time::Instant;

use fake::Fake;
use fake::faker::lorem::en::{Sentence, Word};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{SEED_MARKER, SectionSeed};
use crate::CliResult;

pub fn generate_sections(count: usize) -> Vec<SectionSeed> {
    (0..count)
        .map(|idx| {
            let word: String = Word().fake();
            let sentence: String = Sentence(3..8).fake();

            SectionSeed {
                name: format!("Turma {} {}", idx + 1, word),
                description: format!("{} {}", sentence, SEED_MARKER),
            }
        })
        .collect()
}

pub async fn seed_sections(db: &PgPool, count: usize) -> CliResult<Vec<i32>> {
    let start_time = Instant::now();
    println!("Seeding {} sections...", count);

    let sections = generate_sections(count);
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO sections (name, description) ");
    query.push_values(&sections, |mut row, section| {
        row.push_bind(&section.name).push_bind(&section.description);
    });
    query.push(" RETURNING id");

    let ids: Vec<i32> = query.build_query_scalar().fetch_all(db).await?;

    println!(
        "   Inserted {} sections in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
