//! Registration data model.
//!
//! A registration links one student to one course. The student name, student
//! email and course title are copied at creation time and are not refreshed
//! when the parents are later edited.

use super::{Course, CourseId, CourseTitle, Email, PersonName, RegistrationId, Student, StudentId};

/// Values required to insert a registration; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub student_name: PersonName,
    pub student_email: Email,
    pub course_title: CourseTitle,
}

impl RegistrationDraft {
    /// Build a draft that snapshots the current student and course fields.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::{
    ///     Course, CourseDraft, CourseId, CourseTitle, Email, PasswordHash, PersonName,
    ///     RegistrationDraft, Student, StudentDraft, StudentId,
    /// };
    ///
    /// let student = Student::from_draft(
    ///     StudentId::new(1).unwrap(),
    ///     StudentDraft {
    ///         name: PersonName::new("Ada").unwrap(),
    ///         email: Email::new("ada@example.com").unwrap(),
    ///         password_hash: PasswordHash::from_encoded("hash"),
    ///     },
    /// );
    /// let course = Course::from_draft(
    ///     CourseId::new(1).unwrap(),
    ///     CourseDraft {
    ///         title: CourseTitle::new("Compilers").unwrap(),
    ///         description: None,
    ///     },
    /// );
    /// let draft = RegistrationDraft::snapshot(&student, &course);
    /// assert_eq!(draft.course_title.as_str(), "Compilers");
    /// ```
    #[must_use]
    pub fn snapshot(student: &Student, course: &Course) -> Self {
        Self {
            student_id: student.id(),
            course_id: course.id(),
            student_name: student.name().clone(),
            student_email: student.email().clone(),
            course_title: course.title().clone(),
        }
    }
}

/// Persisted registration record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    id: RegistrationId,
    student_id: StudentId,
    course_id: CourseId,
    student_name: PersonName,
    student_email: Email,
    course_title: CourseTitle,
}

impl Registration {
    /// Combine a store-assigned id with the draft values.
    #[must_use]
    pub fn from_draft(id: RegistrationId, draft: RegistrationDraft) -> Self {
        let RegistrationDraft {
            student_id,
            course_id,
            student_name,
            student_email,
            course_title,
        } = draft;
        Self {
            id,
            student_id,
            course_id,
            student_name,
            student_email,
            course_title,
        }
    }

    #[must_use]
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    #[must_use]
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Student name at the time of registration.
    #[must_use]
    pub fn student_name(&self) -> &PersonName {
        &self.student_name
    }

    /// Student email at the time of registration.
    #[must_use]
    pub fn student_email(&self) -> &Email {
        &self.student_email
    }

    /// Course title at the time of registration.
    #[must_use]
    pub fn course_title(&self) -> &CourseTitle {
        &self.course_title
    }
}
