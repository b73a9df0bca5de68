//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer. Conversion into domain types
//! re-runs domain validation so a hand-edited row cannot smuggle an invalid
//! value past the HTTP layer.

use diesel::prelude::*;

use crate::domain::{
    Course, CourseDescription, CourseDraft, CourseId, CourseTitle, Email, PasswordHash,
    PersonName, Registration, RegistrationDraft, RegistrationId, Student, StudentDraft, StudentId,
};

use super::schema::{courses, registrations, students};

/// Row read from `students`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Insertable form of a student draft.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Full replacement of a student's mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a StudentDraft> for NewStudentRow<'a> {
    fn from(draft: &'a StudentDraft) -> Self {
        Self {
            name: draft.name.as_str(),
            email: draft.email.as_str(),
            password_hash: draft.password_hash.as_str(),
        }
    }
}

impl<'a> From<&'a Student> for StudentChangeset<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            name: student.name().as_str(),
            email: student.email().as_str(),
            password_hash: student.password_hash().as_str(),
        }
    }
}

impl TryFrom<StudentRow> for Student {
    type Error = String;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let id = StudentId::new(row.id).map_err(|err| err.to_string())?;
        let draft = StudentDraft {
            name: PersonName::new(&row.name).map_err(|err| err.to_string())?,
            email: Email::new(&row.email).map_err(|err| err.to_string())?,
            password_hash: PasswordHash::from_encoded(row.password_hash),
        };
        Ok(Student::from_draft(id, draft))
    }
}

/// Row read from `courses`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
}

/// Insertable form of a course draft.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

/// Full replacement of a course's mutable columns.
///
/// A missing description clears the column instead of leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a CourseDraft> for NewCourseRow<'a> {
    fn from(draft: &'a CourseDraft) -> Self {
        Self {
            title: draft.title.as_str(),
            description: draft.description.as_ref().map(CourseDescription::as_str),
        }
    }
}

impl<'a> From<&'a Course> for CourseChangeset<'a> {
    fn from(course: &'a Course) -> Self {
        Self {
            title: course.title().as_str(),
            description: course.description().map(CourseDescription::as_str),
        }
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = String;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let id = CourseId::new(row.id).map_err(|err| err.to_string())?;
        let description = row
            .description
            .map(CourseDescription::new)
            .transpose()
            .map_err(|err| err.to_string())?;
        let draft = CourseDraft {
            title: CourseTitle::new(&row.title).map_err(|err| err.to_string())?,
            description,
        };
        Ok(Course::from_draft(id, draft))
    }
}

/// Row read from `registrations`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrationRow {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub student_name: String,
    pub student_email: String,
    pub course_title: String,
}

/// Insertable form of a registration draft.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewRegistrationRow<'a> {
    pub student_id: i32,
    pub course_id: i32,
    pub student_name: &'a str,
    pub student_email: &'a str,
    pub course_title: &'a str,
}

impl<'a> From<&'a RegistrationDraft> for NewRegistrationRow<'a> {
    fn from(draft: &'a RegistrationDraft) -> Self {
        Self {
            student_id: draft.student_id.get(),
            course_id: draft.course_id.get(),
            student_name: draft.student_name.as_str(),
            student_email: draft.student_email.as_str(),
            course_title: draft.course_title.as_str(),
        }
    }
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = String;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let id = RegistrationId::new(row.id).map_err(|err| err.to_string())?;
        let draft = RegistrationDraft {
            student_id: StudentId::new(row.student_id).map_err(|err| err.to_string())?,
            course_id: CourseId::new(row.course_id).map_err(|err| err.to_string())?,
            student_name: PersonName::new(&row.student_name).map_err(|err| err.to_string())?,
            student_email: Email::new(&row.student_email).map_err(|err| err.to_string())?,
            course_title: CourseTitle::new(&row.course_title).map_err(|err| err.to_string())?,
        };
        Ok(Registration::from_draft(id, draft))
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion checks.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn student_row_round_trips_through_domain() {
        let row = StudentRow {
            id: 3,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".into(),
        };
        let student = Student::try_from(row).expect("valid row");
        let changes = StudentChangeset::from(&student);
        assert_eq!(student.id().get(), 3);
        assert_eq!(changes.email, "ada@example.com");
        assert_eq!(changes.password_hash, "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA");
    }

    #[rstest]
    #[case(0, "Ada", "ada@example.com")]
    #[case(1, "  ", "ada@example.com")]
    #[case(1, "Ada", "not-an-email")]
    fn invalid_student_rows_are_rejected(
        #[case] id: i32,
        #[case] name: &str,
        #[case] email: &str,
    ) {
        let row = StudentRow {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: String::new(),
        };
        assert!(Student::try_from(row).is_err());
    }

    #[rstest]
    fn course_changeset_clears_absent_description() {
        let row = CourseRow {
            id: 1,
            title: "Logic".into(),
            description: None,
        };
        let course = Course::try_from(row).expect("valid row");
        assert!(CourseChangeset::from(&course).description.is_none());
    }

    #[rstest]
    fn registration_row_keeps_snapshot_columns() {
        let row = RegistrationRow {
            id: 9,
            student_id: 1,
            course_id: 2,
            student_name: "Ada".into(),
            student_email: "ada@example.com".into(),
            course_title: "Logic".into(),
        };
        let registration = Registration::try_from(row).expect("valid row");
        assert_eq!(registration.course_title().as_str(), "Logic");
        assert_eq!(registration.course_id().get(), 2);
    }
}
