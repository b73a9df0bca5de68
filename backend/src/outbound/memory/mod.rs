//! In-process store adapters.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Contents are lost when the process exits.

mod course_store;
mod registration_store;
mod student_store;
mod table;

pub use course_store::MemoryCourseRepository;
pub use registration_store::MemoryRegistrationRepository;
pub use student_store::MemoryStudentRepository;
pub use table::TableError;
