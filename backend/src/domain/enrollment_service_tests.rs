//! Tests for the enrollment coordinator.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockCourseRepository, MockRegistrationRepository, MockStudentRepository,
    RegistrationRepositoryError, StudentRepositoryError,
};
use crate::domain::{
    Course, CourseDraft, CourseTitle, Email, ErrorCode, PasswordHash, PersonName, Student,
    StudentDraft,
};

type Service =
    EnrollmentService<MockStudentRepository, MockCourseRepository, MockRegistrationRepository>;

#[fixture]
fn student() -> Student {
    Student::from_draft(
        StudentId::new(1).expect("valid id"),
        StudentDraft {
            name: PersonName::new("Ada Lovelace").expect("valid name"),
            email: Email::new("ada@example.com").expect("valid email"),
            password_hash: PasswordHash::from_encoded("hash"),
        },
    )
}

#[fixture]
fn course() -> Course {
    Course::from_draft(
        CourseId::new(1).expect("valid id"),
        CourseDraft {
            title: CourseTitle::new("Analytical Engines").expect("valid title"),
            description: None,
        },
    )
}

fn service(
    students: MockStudentRepository,
    courses: MockCourseRepository,
    registrations: MockRegistrationRepository,
) -> Service {
    EnrollmentService::new(
        Arc::new(students),
        Arc::new(courses),
        Arc::new(registrations),
        IntegrityGate::best_effort(),
    )
}

#[rstest]
#[tokio::test]
async fn create_snapshots_student_and_course_fields(student: Student, course: Course) {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(student)));
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(course)));
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_insert()
        .times(1)
        .withf(|draft| {
            draft.student_name.as_str() == "Ada Lovelace"
                && draft.student_email.as_str() == "ada@example.com"
                && draft.course_title.as_str() == "Analytical Engines"
        })
        .returning(|draft| {
            Ok(Registration::from_draft(
                RegistrationId::new(1).expect("valid id"),
                draft.clone(),
            ))
        });

    let created = service(students, courses, registrations)
        .create_registration(
            StudentId::new(1).expect("valid id"),
            CourseId::new(1).expect("valid id"),
        )
        .await
        .expect("registration created");

    assert_eq!(created.id().get(), 1);
    assert_eq!(created.student_id().get(), 1);
    assert_eq!(created.course_id().get(), 1);
}

#[rstest]
#[tokio::test]
async fn create_checks_student_before_course() {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_id().return_once(|_| Ok(None));
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().times(0);
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_insert().times(0);

    let err = service(students, courses, registrations)
        .create_registration(
            StudentId::new(9).expect("valid id"),
            CourseId::new(9).expect("valid id"),
        )
        .await
        .expect_err("missing student");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(err.message().contains("student 9"));
}

#[rstest]
#[tokio::test]
async fn create_with_missing_course_writes_nothing(student: Student) {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(student)));
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_insert().times(0);

    let err = service(students, courses, registrations)
        .create_registration(
            StudentId::new(1).expect("valid id"),
            CourseId::new(4).expect("valid id"),
        )
        .await
        .expect_err("missing course");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(err.message().contains("course 4"));
}

#[rstest]
#[tokio::test]
async fn create_maps_dangling_insert_to_not_found(student: Student, course: Course) {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(student)));
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(course)));
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_insert()
        .return_once(|_| Err(RegistrationRepositoryError::missing_reference("fk")));

    let err = service(students, courses, registrations)
        .create_registration(
            StudentId::new(1).expect("valid id"),
            CourseId::new(1).expect("valid id"),
        )
        .await
        .expect_err("dangling insert");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_for_missing_student_is_not_found() {
    let mut students = MockStudentRepository::new();
    students.expect_exists_by_id().return_once(|_| Ok(false));
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_find_by_student_id().times(0);

    let err = service(students, MockCourseRepository::new(), registrations)
        .list_for_student(StudentId::new(2).expect("valid id"))
        .await
        .expect_err("missing student");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_for_student_without_registrations_is_empty() {
    let mut students = MockStudentRepository::new();
    students.expect_exists_by_id().return_once(|_| Ok(true));
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_find_by_student_id()
        .return_once(|_| Ok(Vec::new()));

    let listed = service(students, MockCourseRepository::new(), registrations)
        .list_for_student(StudentId::new(2).expect("valid id"))
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_for_missing_course_is_not_found() {
    let mut courses = MockCourseRepository::new();
    courses.expect_exists_by_id().return_once(|_| Ok(false));
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_find_by_course_id().times(0);

    let err = service(MockStudentRepository::new(), courses, registrations)
        .list_for_course(CourseId::new(3).expect("valid id"))
        .await
        .expect_err("missing course");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_missing_registration_is_not_found() {
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_exists_by_id().return_once(|_| Ok(false));
    registrations.expect_delete_by_id().never();

    let err = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        registrations,
    )
    .delete_registration(RegistrationId::new(5).expect("valid id"))
    .await
    .expect_err("missing registration");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case::present(true, Ok(()))]
#[case::deleted_concurrently(false, Err(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_checks_existence_before_removing(
    #[case] removed: bool,
    #[case] expected: Result<(), ErrorCode>,
) {
    let mut registrations = MockRegistrationRepository::new();
    registrations
        .expect_exists_by_id()
        .withf(|id| id.get() == 5)
        .return_once(|_| Ok(true));
    registrations
        .expect_delete_by_id()
        .times(1)
        .return_once(move |_| Ok(removed));

    let outcome = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        registrations,
    )
    .delete_registration(RegistrationId::new(5).expect("valid id"))
    .await
    .map_err(|err| err.code());

    assert_eq!(outcome, expected);
}

#[rstest]
#[tokio::test]
async fn student_store_outage_is_service_unavailable() {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(|_| Err(StudentRepositoryError::connection("refused")));

    let err = service(
        students,
        MockCourseRepository::new(),
        MockRegistrationRepository::new(),
    )
    .create_registration(
        StudentId::new(1).expect("valid id"),
        CourseId::new(1).expect("valid id"),
    )
    .await
    .expect_err("outage");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn get_missing_registration_is_not_found() {
    let mut registrations = MockRegistrationRepository::new();
    registrations.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        registrations,
    )
    .get_registration(RegistrationId::new(1).expect("valid id"))
    .await
    .expect_err("missing registration");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
