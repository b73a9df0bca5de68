//! Shared helpers for the HTTP integration tests.
//!
//! Every test builds the full application over in-memory stores and talks
//! to it through actix's test service, so no database is required.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use registrar::Trace;
use registrar::domain::IntegrityGate;
use registrar::domain::ports::PasswordHasher;
use registrar::inbound::http::configure;
use registrar::inbound::http::health::HealthState;
use registrar::inbound::http::state::HttpState;
use registrar::outbound::crypto::Argon2PasswordHasher;

/// Password used for every student created through [`create_student`].
pub const PASSWORD: &str = "correct horse";

/// Initialise the application over fresh in-memory stores.
pub async fn init_app(
    serialized: bool,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    init_app_with(HttpState::in_memory(hasher(), IntegrityGate::for_mode(serialized))).await
}

/// Initialise the application over caller-assembled state.
pub async fn init_app_with(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(health)
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Password hasher tuned down so the suites stay fast.
pub fn hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(Argon2PasswordHasher::with_cost(8, 1, 1).expect("valid argon2 cost"))
}

/// Basic credentials for `email` with the shared password.
pub fn basic(email: &str) -> (&'static str, String) {
    basic_with(email, PASSWORD)
}

/// Basic credentials for an arbitrary email and password.
pub fn basic_with(email: &str, password: &str) -> (&'static str, String) {
    (
        "Authorization",
        format!("Basic {}", STANDARD.encode(format!("{email}:{password}"))),
    )
}

/// Send `request` and return the status with the decoded JSON body.
///
/// Empty bodies decode to `Value::Null`.
pub async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

/// Create a student through the open endpoint and return its id.
pub async fn create_student<S, B>(app: &S, name: &str, email: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(json!({ "name": name, "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create student failed: {body}");
    body["id"].as_i64().expect("numeric id")
}

/// Create a course as `caller` and return its id.
pub async fn create_course<S, B>(app: &S, caller: &str, title: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(basic(caller))
            .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course failed: {body}");
    body["id"].as_i64().expect("numeric id")
}
