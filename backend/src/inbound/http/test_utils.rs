//! Test helpers for the HTTP handlers.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::ports::{
    LoginService, MockCourseCommand, MockCourseQuery, MockLoginService, MockRegistrationCommand,
    MockRegistrationQuery, MockStudentCommand, MockStudentQuery,
};
use crate::domain::{
    Course, CourseDraft, CourseId, CourseTitle, Email, PasswordHash, PersonName, Student,
    StudentDraft, StudentId,
};

use super::state::HttpState;

/// Principal accepted by [`HandlerMocks::new`].
pub const CALLER_EMAIL: &str = "ada@example.com";

pub fn student(id: i32, name: &str, email: &str) -> Student {
    Student::from_draft(
        StudentId::new(id).expect("valid id"),
        StudentDraft {
            name: PersonName::new(name).expect("valid name"),
            email: Email::new(email).expect("valid email"),
            password_hash: PasswordHash::from_encoded("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA"),
        },
    )
}

pub fn course(id: i32, title: &str) -> Course {
    Course::from_draft(
        CourseId::new(id).expect("valid id"),
        CourseDraft {
            title: CourseTitle::new(title).expect("valid title"),
            description: None,
        },
    )
}

/// `Authorization` header for the accepted caller.
pub fn caller_auth() -> (actix_web::http::header::HeaderName, String) {
    (
        AUTHORIZATION,
        format!("Basic {}", STANDARD.encode(format!("{CALLER_EMAIL}:secret"))),
    )
}

/// One mock per driving port. Unconfigured mocks panic when called, which
/// doubles as an assertion that the handler never reached them.
pub struct HandlerMocks {
    pub login: MockLoginService,
    pub students: MockStudentCommand,
    pub students_query: MockStudentQuery,
    pub courses: MockCourseCommand,
    pub courses_query: MockCourseQuery,
    pub registrations: MockRegistrationCommand,
    pub registrations_query: MockRegistrationQuery,
}

impl HandlerMocks {
    /// Mocks whose login port accepts [`caller_auth`] and nothing else.
    pub fn new() -> Self {
        let mut login = MockLoginService::new();
        login.expect_authenticate().returning(|credentials| {
            if credentials.principal() == CALLER_EMAIL && credentials.password() == "secret" {
                Ok(student(1, "Ada Lovelace", CALLER_EMAIL))
            } else {
                Err(crate::domain::Error::unauthorized("invalid credentials"))
            }
        });
        Self {
            login,
            students: MockStudentCommand::new(),
            students_query: MockStudentQuery::new(),
            courses: MockCourseCommand::new(),
            courses_query: MockCourseQuery::new(),
            registrations: MockRegistrationCommand::new(),
            registrations_query: MockRegistrationQuery::new(),
        }
    }

    pub fn into_state(mut self) -> web::Data<HttpState> {
        let login = Arc::new(std::mem::replace(&mut self.login, MockLoginService::new()));
        self.into_state_with_login(login)
    }

    /// Like [`Self::into_state`] but with a caller-supplied login port.
    pub fn into_state_with_login(self, login: Arc<dyn LoginService>) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login,
            students: Arc::new(self.students),
            students_query: Arc::new(self.students_query),
            courses: Arc::new(self.courses),
            courses_query: Arc::new(self.courses_query),
            registrations: Arc::new(self.registrations),
            registrations_query: Arc::new(self.registrations_query),
        })
    }
}
