//! Student endpoints.
//!
//! ```text
//! POST   /api/students            (no authentication)
//! GET    /api/students
//! GET    /api/students/{id}
//! PUT    /api/students/{id}
//! DELETE /api/students/{id}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{NewStudent, StudentUpdate};
use crate::domain::{Email, Error, Password, PersonName, Student, StudentId};

use super::ApiResult;
use super::auth::{AuthenticatedStudent, require_student};
use super::state::HttpState;
use super::validation::{parse_path_id, password_error, student_error};

/// Body of `POST /api/students`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Body of `PUT /api/students/{id}`.
///
/// A missing or empty `password` keeps the current one.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Student as returned to clients. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: StudentId,
    pub name: String,
    pub email: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().as_str().to_owned(),
            email: student.email().as_str().to_owned(),
        }
    }
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = Error;

    fn try_from(value: CreateStudentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PersonName::new(&value.name).map_err(student_error)?,
            email: Email::new(&value.email).map_err(student_error)?,
            password: Password::new(&value.password).map_err(password_error)?,
        })
    }
}

impl TryFrom<UpdateStudentRequest> for StudentUpdate {
    type Error = Error;

    fn try_from(value: UpdateStudentRequest) -> Result<Self, Self::Error> {
        let password = value
            .password
            .filter(|raw| !raw.is_empty())
            .map(|raw| Password::new(&raw))
            .transpose()
            .map_err(password_error)?;
        Ok(Self {
            name: PersonName::new(&value.name).map_err(student_error)?,
            email: Email::new(&value.email).map_err(student_error)?,
            password,
        })
    }
}

/// Register a new student. This is the only endpoint open to anonymous
/// callers.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse,
            headers(("Location" = String, description = "URL of the new student"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["students"],
    operation_id = "createStudent",
    security([])
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let new_student = NewStudent::try_from(payload.into_inner())?;
    let student = state.students.create_student(new_student).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/api/students/{}", student.id())))
        .json(StudentResponse::from(&student)))
}

/// List every student.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students", body = [StudentResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students", wrap = "from_fn(require_student)")]
pub async fn list_students(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state.students_query.list_students().await?;
    Ok(web::Json(students.iter().map(StudentResponse::from).collect()))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such student", body = Error)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}", wrap = "from_fn(require_student)")]
pub async fn get_student(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id: StudentId = parse_path_id(&path)?;
    let student = state.students_query.get_student(id).await?;
    Ok(web::Json(StudentResponse::from(&student)))
}

/// Replace a student's name and email, and optionally the password.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated student", body = StudentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such student", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}", wrap = "from_fn(require_student)")]
pub async fn update_student(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStudentRequest>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id: StudentId = parse_path_id(&path)?;
    let update = StudentUpdate::try_from(payload.into_inner())?;
    let student = state.students.update_student(id, update).await?;
    Ok(web::Json(StudentResponse::from(&student)))
}

/// Delete a student that no registration references.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such student", body = Error),
        (status = 409, description = "Student still has registrations", body = Error)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}", wrap = "from_fn(require_student)")]
pub async fn delete_student(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: StudentId = parse_path_id(&path)?;
    state.students.delete_student(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
