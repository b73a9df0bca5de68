//! HTTP Basic authentication.
//!
//! Protected routes are wrapped in [`require_student`], which decodes the
//! `Authorization: Basic` header and asks the login port to resolve and
//! verify the principal before any of the route's extractors run. A failed
//! check answers 401 without touching the request body. Handlers receive the
//! verified caller through the [`AuthenticatedStudent`] extractor. Nothing
//! is remembered between requests.

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::middleware::Next;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::{Credentials, Error, Student};

use super::state::HttpState;

const SCHEME: &str = "Basic";

/// Student whose credentials accompanied the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedStudent(Student);

impl AuthenticatedStudent {
    /// The authenticated student record.
    pub fn student(&self) -> &Student {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> Student {
        self.0
    }
}

fn challenge(reason: &'static str) -> Error {
    debug!(reason, "basic authentication rejected");
    Error::unauthorized("authentication required")
}

/// Decode `Authorization: Basic base64(principal:password)`.
///
/// Every malformed header yields the same 401 as a missing one.
pub(crate) fn credentials_from_header(header: Option<&str>) -> Result<Credentials, Error> {
    let header = header.ok_or_else(|| challenge("missing authorization header"))?;
    let (scheme, encoded) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| challenge("authorization header has no scheme"))?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(challenge("unsupported authorization scheme"));
    }
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| challenge("credentials are not valid base64"))?;
    let decoded =
        String::from_utf8(decoded).map_err(|_| challenge("credentials are not valid UTF-8"))?;
    let (principal, password) = decoded
        .split_once(':')
        .ok_or_else(|| challenge("credentials lack a colon separator"))?;
    Credentials::try_from_parts(principal, password)
        .map_err(|_| challenge("credentials are blank"))
}

async fn authenticate(req: &ServiceRequest) -> Result<Student, Error> {
    let credentials = credentials_from_header(
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    state.login.authenticate(&credentials).await
}

/// Route middleware admitting only requests with valid Basic credentials.
///
/// Attach it with `wrap = "from_fn(require_student)"` on the route macro.
/// On success the student is stored in the request extensions for
/// [`AuthenticatedStudent`]; on failure the domain error becomes the
/// response and the inner service never runs.
pub async fn require_student(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    match authenticate(&req).await {
        Ok(student) => {
            req.extensions_mut().insert(AuthenticatedStudent(student));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(err) => Ok(req.error_response(err).map_into_right_body()),
    }
}

impl FromRequest for AuthenticatedStudent {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let caller = req.extensions().get::<Self>().cloned().ok_or_else(|| {
            error!(path = req.path(), "route is missing the authentication middleware");
            Error::unauthorized("authentication required")
        });
        ready(caller)
    }
}
