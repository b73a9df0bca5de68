//! Diesel table definitions.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered students.
    students (id) {
        /// Serial primary key, never reused.
        id -> Int4,
        name -> Varchar,
        /// Unique across the table.
        email -> Varchar,
        /// Encoded hash produced by the password hasher.
        password_hash -> Varchar,
    }
}

diesel::table! {
    /// Offered courses.
    courses (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Enrolments with the student and course details captured at creation.
    registrations (id) {
        id -> Int4,
        /// References `students.id`; deletion of the student is restricted.
        student_id -> Int4,
        /// References `courses.id`; deletion of the course is restricted.
        course_id -> Int4,
        student_name -> Varchar,
        student_email -> Varchar,
        course_title -> Varchar,
    }
}

diesel::joinable!(registrations -> students (student_id));
diesel::joinable!(registrations -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(courses, registrations, students);
