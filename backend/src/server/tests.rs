//! Tests for server bootstrap and readiness signalling.

use std::net::SocketAddr;

use actix_web::{test, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use super::{AppDependencies, ServerConfig, build_app, create_server};
use super::state_builders::build_http_state;
use registrar::inbound::http::health::HealthState;

fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

fn config() -> ServerConfig {
    let addr: SocketAddr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(addr)
}

#[actix_rt::test]
async fn create_server_marks_ready() {
    let health_state = health_state();
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config()).expect("server should build");

    assert!(health_state.is_ready(), "server creation should mark readiness");
}

#[std::prelude::v1::test]
fn builder_records_integrity_mode() {
    let config = config().with_serialized_integrity(true);
    assert!(config.serialized_integrity);
    assert!(config.db_pool.is_none());
    assert_eq!(config.bind_addr().ip().to_string(), "127.0.0.1");
}

#[actix_rt::test]
async fn app_serves_api_probes_and_trace_headers() {
    let health_state = health_state();
    health_state.mark_ready();
    let app = test::init_service(build_app(AppDependencies {
        health_state,
        http_state: build_http_state(&config()),
    }))
    .await;

    let ready = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(ready.status(), 200);
    assert!(ready.headers().contains_key("trace-id"));

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), 201);

    let listed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/students")
            .insert_header((
                "Authorization",
                format!("Basic {}", STANDARD.encode("ada@example.com:secret")),
            ))
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), 200);
    let body: Value = test::read_body_json(listed).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
