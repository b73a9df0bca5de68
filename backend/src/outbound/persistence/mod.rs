//! PostgreSQL adapters built on Diesel.
//!
//! Repositories translate between Diesel rows and domain types and map
//! database failures onto port errors. Rows and table definitions stay
//! private to this module.
//!
//! ```no_run
//! use registrar::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registrar")).await?;
//! let students = DieselStudentRepository::new(pool);
//! # let _ = students;
//! # Ok(())
//! # }
//! ```

mod diesel_course_repository;
mod diesel_helpers;
mod diesel_registration_repository;
mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
