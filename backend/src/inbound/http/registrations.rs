//! Registration endpoints, including the per-student and per-course
//! listings. Registrations are never updated in place.

use actix_web::http::header::LOCATION;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseId, Error, Registration, RegistrationId, StudentId};

use super::ApiResult;
use super::auth::{AuthenticatedStudent, require_student};
use super::state::HttpState;
use super::validation::{parse_id, parse_path_id};

/// Body of `POST /api/registrations`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    #[schema(example = 1)]
    pub student_id: i64,
    #[schema(example = 1)]
    pub course_id: i64,
}

/// Registration with the student and course details captured when it was
/// created. Later edits to the student or course are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub student_name: String,
    pub student_email: String,
    pub course_title: String,
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id(),
            student_id: registration.student_id(),
            course_id: registration.course_id(),
            student_name: registration.student_name().as_str().to_owned(),
            student_email: registration.student_email().as_str().to_owned(),
            course_title: registration.course_title().as_str().to_owned(),
        }
    }
}

fn to_responses(registrations: &[Registration]) -> Vec<RegistrationResponse> {
    registrations.iter().map(RegistrationResponse::from).collect()
}

/// Enrol a student on a course.
#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 400, description = "Invalid identifiers", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Student or course not found", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "createRegistration"
)]
#[post("/registrations", wrap = "from_fn(require_student)")]
pub async fn create_registration(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    payload: web::Json<CreateRegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let CreateRegistrationRequest {
        student_id,
        course_id,
    } = payload.into_inner();
    let student_id: StudentId = parse_id("studentId", student_id)?;
    let course_id: CourseId = parse_id("courseId", course_id)?;
    let registration = state
        .registrations
        .create_registration(student_id, course_id)
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((
            LOCATION,
            format!("/api/registrations/{}", registration.id()),
        ))
        .json(RegistrationResponse::from(&registration)))
}

/// List every registration.
#[utoipa::path(
    get,
    path = "/api/registrations",
    responses(
        (status = 200, description = "Registrations", body = [RegistrationResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "listRegistrations"
)]
#[get("/registrations", wrap = "from_fn(require_student)")]
pub async fn list_registrations(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RegistrationResponse>>> {
    let registrations = state.registrations_query.list_registrations().await?;
    Ok(web::Json(to_responses(&registrations)))
}

/// Fetch one registration.
#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    params(("id" = i32, Path, description = "Registration identifier")),
    responses(
        (status = 200, description = "Registration", body = RegistrationResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such registration", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "getRegistration"
)]
#[get("/registrations/{id}", wrap = "from_fn(require_student)")]
pub async fn get_registration(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RegistrationResponse>> {
    let id: RegistrationId = parse_path_id(&path)?;
    let registration = state.registrations_query.get_registration(id).await?;
    Ok(web::Json(RegistrationResponse::from(&registration)))
}

/// Remove a registration. The student and course are untouched.
#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(("id" = i32, Path, description = "Registration identifier")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such registration", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "deleteRegistration"
)]
#[delete("/registrations/{id}", wrap = "from_fn(require_student)")]
pub async fn delete_registration(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: RegistrationId = parse_path_id(&path)?;
    state.registrations.delete_registration(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Registrations of one student.
#[utoipa::path(
    get,
    path = "/api/students/{id}/registrations",
    params(("id" = i32, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Registrations, possibly empty", body = [RegistrationResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such student", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "listStudentRegistrations"
)]
#[get("/students/{id}/registrations", wrap = "from_fn(require_student)")]
pub async fn list_student_registrations(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RegistrationResponse>>> {
    let id: StudentId = parse_path_id(&path)?;
    let registrations = state.registrations_query.list_for_student(id).await?;
    Ok(web::Json(to_responses(&registrations)))
}

/// Registrations on one course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/registrations",
    params(("id" = i32, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Registrations, possibly empty", body = [RegistrationResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such course", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "listCourseRegistrations"
)]
#[get("/courses/{id}/registrations", wrap = "from_fn(require_student)")]
pub async fn list_course_registrations(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RegistrationResponse>>> {
    let id: CourseId = parse_path_id(&path)?;
    let registrations = state.registrations_query.list_for_course(id).await?;
    Ok(web::Json(to_responses(&registrations)))
}
