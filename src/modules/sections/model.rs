pub use classroll_models::enrollments::EnrolledStudent;
pub use classroll_models::sections::*;
