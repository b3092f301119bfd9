use std::time::Instant;

use chrono::NaiveDate;
use classroll_models::national_id::NationalId;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{SEED_EMAIL_DOMAIN, StudentSeed};
use crate::CliResult;

// Postgres caps bind parameters at 65535; 5 per row.
const BATCH_SIZE: usize = 1000;

/// Generates students with valid national IDs and unique-looking emails.
pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    let mut rng = rand::thread_rng();
    let run: u32 = rng.gen_range(0..100_000);

    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            StudentSeed {
                email: format!(
                    "{}.{}+{}.{}@{}",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    run,
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                name: format!("{} {}", first_name, last_name),
                birth_date: random_birth_date(&mut rng),
                national_id: random_national_id(&mut rng).into_inner(),
            }
        })
        .collect()
}

fn random_birth_date(rng: &mut impl Rng) -> NaiveDate {
    let year = rng.gen_range(1990..=2008);
    let ordinal = rng.gen_range(1..=365);
    NaiveDate::from_yo_opt(year, ordinal).unwrap_or_default()
}

fn random_national_id(rng: &mut impl Rng) -> NationalId {
    loop {
        let base: [u8; 9] = std::array::from_fn(|_| rng.gen_range(0..=9));
        if let Some(id) = NationalId::from_base(base) {
            return id;
        }
    }
}

/// Inserts generated students. Rows colliding with an existing national ID
/// or email are skipped, so fewer ids than requested may come back.
pub async fn seed_students(db: &PgPool, count: usize, password_hash: &str) -> CliResult<Vec<i32>> {
    let start_time = Instant::now();
    println!("Seeding {} students...", count);

    let students = generate_students(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(students.len());

    for chunk in students.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO students (name, birth_date, national_id, email, password_hash) ",
        );
        query.push_values(chunk, |mut row, student| {
            row.push_bind(&student.name)
                .push_bind(student.birth_date)
                .push_bind(&student.national_id)
                .push_bind(&student.email)
                .push_bind(password_hash);
        });
        query.push(" ON CONFLICT DO NOTHING RETURNING id");

        let chunk_ids: Vec<i32> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;

    println!(
        "   Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
