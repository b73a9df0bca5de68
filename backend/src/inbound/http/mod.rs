//! HTTP inbound adapter exposing the REST endpoints.
//!
//! [`configure`] registers every route so the server binary and the
//! integration tests mount exactly the same surface.

use actix_web::web;

pub mod auth;
pub mod courses;
pub mod error;
pub mod health;
pub mod registrations;
pub mod state;
pub mod students;
#[cfg(test)]
pub(crate) mod test_utils;
mod validation;

pub use error::ApiResult;

/// Register the `/api` scope and the health probes.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// ```
/// use actix_web::App;
///
/// let _app = App::new().configure(registrar::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(
            web::scope("/api")
                .service(students::create_student)
                .service(students::list_students)
                .service(registrations::list_student_registrations)
                .service(students::get_student)
                .service(students::update_student)
                .service(students::delete_student)
                .service(courses::create_course)
                .service(courses::list_courses)
                .service(registrations::list_course_registrations)
                .service(courses::get_course)
                .service(courses::update_course)
                .service(courses::delete_course)
                .service(registrations::create_registration)
                .service(registrations::list_registrations)
                .service(registrations::get_registration)
                .service(registrations::delete_registration),
        )
        .service(health::ready)
        .service(health::live);
}
