pub mod auth;
pub mod enrollments;
pub mod sections;
pub mod students;
