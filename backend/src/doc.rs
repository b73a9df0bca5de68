//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI at `/docs` in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::courses::{CourseRequest, CourseResponse};
use crate::inbound::http::registrations::{CreateRegistrationRequest, RegistrationResponse};
use crate::inbound::http::students::{
    CreateStudentRequest, StudentResponse, UpdateStudentRequest,
};

/// Name of the HTTP Basic security scheme.
pub const BASIC_AUTH_SCHEME: &str = "basicAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            BASIC_AUTH_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some("Student email and password."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the registrar API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Registrar API",
        description = "Students, courses and the registrations linking them."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("basicAuth" = [])),
    paths(
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::registrations::create_registration,
        crate::inbound::http::registrations::list_registrations,
        crate::inbound::http::registrations::get_registration,
        crate::inbound::http::registrations::delete_registration,
        crate::inbound::http::registrations::list_student_registrations,
        crate::inbound::http::registrations::list_course_registrations,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CreateStudentRequest,
        UpdateStudentRequest,
        StudentResponse,
        CourseRequest,
        CourseResponse,
        CreateRegistrationRequest,
        RegistrationResponse,
    )),
    tags(
        (name = "students", description = "Student accounts"),
        (name = "courses", description = "Course catalogue"),
        (name = "registrations", description = "Enrolments of students on courses"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;
