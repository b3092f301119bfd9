use chrono::NaiveDate;
use classroll_cli::admin::{AdminInput, create_admin};
use classroll_cli::seeder::{self, SeedConfig};
use classroll_config::DatabaseConfig;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "classroll-cli")]
#[command(about = "Classroll CLI - Administrative tools for Classroll", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the bootstrap administrator (reserved id 1)
    CreateAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(short = 'b', long)]
        birth_date: Option<NaiveDate>,

        /// National ID (11 digits)
        #[arg(short = 'c', long)]
        national_id: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake students, sections and enrollments
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "50")]
        students: usize,

        /// Number of sections to create
        #[arg(long, default_value = "6")]
        sections: usize,

        /// Maximum number of sections each student is enrolled in
        #[arg(short = 'e', long, default_value = "2")]
        enrollments: usize,
    },
    /// Clear all seeded data (keeps the bootstrap administrator)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Some(db_config) = DatabaseConfig::from_env() else {
        eprintln!("DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match classroll_db::init_db_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if db_config.run_migrations {
        if let Err(e) = classroll_db::run_migrations(&pool).await {
            eprintln!("Failed to run migrations: {}", e);
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::CreateAdmin {
            name,
            birth_date,
            national_id,
            email,
            password,
        } => handle_create_admin(&pool, name, birth_date, national_id, email, password).await,
        Commands::Seed {
            students,
            sections,
            enrollments,
        } => handle_seed(&pool, students, sections, enrollments).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt<T>(value: Option<T>, label: &str) -> T
where
    T: Clone + ToString + std::str::FromStr,
    <T as std::str::FromStr>::Err: ToString,
{
    if let Some(value) = value {
        return value;
    }

    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    birth_date: Option<NaiveDate>,
    national_id: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = prompt(name, "Full name");
    let birth_date = prompt(birth_date, "Birth date (YYYY-MM-DD)");
    let national_id = prompt(national_id, "National ID");
    let email = prompt(email, "Email address");

    let password = match password {
        Some(password) => password,
        None => match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("Failed to read password: {}", e);
                std::process::exit(1);
            }
        },
    };

    let input = AdminInput {
        name,
        birth_date,
        national_id,
        email,
        password,
    };

    match create_admin(pool, &input).await {
        Ok(admin) => {
            println!("\nAdministrator created successfully!");
            println!("   Id: {}", admin.id);
            println!("   Name: {}", admin.name);
            println!("   Email: {}", admin.email);
        }
        Err(e) => {
            eprintln!("\nError creating administrator: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, students: usize, sections: usize, enrollments: usize) {
    let config = SeedConfig::new(students)
        .with_sections(sections)
        .with_enrollments_per_student(enrollments);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\nError seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\nError clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
