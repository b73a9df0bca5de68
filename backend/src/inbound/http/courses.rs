//! Course endpoints. All of them require Basic authentication.

use actix_web::http::header::LOCATION;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, CourseDescription, CourseDraft, CourseId, CourseTitle, Error};

use super::ApiResult;
use super::auth::{AuthenticatedStudent, require_student};
use super::state::HttpState;
use super::validation::{course_error, parse_path_id};

/// Body of `POST /api/courses` and `PUT /api/courses/{id}`.
///
/// On update, an absent `description` clears the stored one.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[schema(example = "Distributed Systems")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Course as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: CourseId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().as_str().to_owned(),
            description: course.description().map(|d| d.as_str().to_owned()),
        }
    }
}

impl TryFrom<CourseRequest> for CourseDraft {
    type Error = Error;

    fn try_from(value: CourseRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: CourseTitle::new(&value.title).map_err(course_error)?,
            description: value
                .description
                .map(CourseDescription::new)
                .transpose()
                .map_err(course_error)?,
        })
    }
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses", wrap = "from_fn(require_student)")]
pub async fn create_course(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.create_course(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/api/courses/{}", course.id())))
        .json(CourseResponse::from(&course)))
}

/// List every course.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses", body = [CourseResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses", wrap = "from_fn(require_student)")]
pub async fn list_courses(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let courses = state.courses_query.list_courses().await?;
    Ok(web::Json(courses.iter().map(CourseResponse::from).collect()))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such course", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}", wrap = "from_fn(require_student)")]
pub async fn get_course(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id: CourseId = parse_path_id(&path)?;
    let course = state.courses_query.get_course(id).await?;
    Ok(web::Json(CourseResponse::from(&course)))
}

/// Replace a course's title and description.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such course", body = Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}", wrap = "from_fn(require_student)")]
pub async fn update_course(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id: CourseId = parse_path_id(&path)?;
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.update_course(id, draft).await?;
    Ok(web::Json(CourseResponse::from(&course)))
}

/// Delete a course that no registration references.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such course", body = Error),
        (status = 409, description = "Course still has registrations", body = Error)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}", wrap = "from_fn(require_student)")]
pub async fn delete_course(
    _caller: AuthenticatedStudent,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: CourseId = parse_path_id(&path)?;
    state.courses.delete_course(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
