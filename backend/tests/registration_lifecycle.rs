//! End-to-end behaviour of students, courses and registrations over HTTP.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::json;

use support::{basic, basic_with, create_course, create_student, init_app, send};

#[actix_rt::test]
async fn full_registration_lifecycle() {
    let app = init_app(false).await;
    let ada = create_student(&app, "Ada Lovelace", "ada@example.com").await;
    let logic = create_course(&app, "ada@example.com", "Logic").await;

    let (status, registration) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/registrations")
            .insert_header(basic("ada@example.com"))
            .set_json(json!({ "studentId": ada, "courseId": logic })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registration["studentName"], json!("Ada Lovelace"));
    assert_eq!(registration["studentEmail"], json!("ada@example.com"));
    assert_eq!(registration["courseTitle"], json!("Logic"));
    let registration_id = registration["id"].as_i64().expect("numeric id");

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/students/{ada}"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{logic}"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/students/{ada}/registrations"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/registrations/{registration_id}"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{logic}"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/students/{ada}"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The deleted student can no longer authenticate.
    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("unauthorized"));
}

#[rstest]
#[case::unknown_principal("nobody@example.com", support::PASSWORD)]
#[case::wrong_password("ada@example.com", "wrong")]
#[actix_rt::test]
async fn bad_credentials_are_unauthorized(#[case] email: &str, #[case] password: &str) {
    let app = init_app(false).await;
    create_student(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/students")
            .insert_header(basic_with(email, password)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("unauthorized"));
    assert!(body["traceId"].is_string());
}

#[actix_rt::test]
async fn registration_requires_live_references() {
    let app = init_app(false).await;
    let ada = create_student(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/registrations")
            .insert_header(basic("ada@example.com"))
            .set_json(json!({ "studentId": ada, "courseId": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/registrations")
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn registration_keeps_the_snapshot_after_a_rename() {
    let app = init_app(false).await;
    let ada = create_student(&app, "Ada", "ada@example.com").await;
    let logic = create_course(&app, "ada@example.com", "Logic").await;
    let (_, registration) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/registrations")
            .insert_header(basic("ada@example.com"))
            .set_json(json!({ "studentId": ada, "courseId": logic })),
    )
    .await;

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/courses/{logic}"))
            .insert_header(basic("ada@example.com"))
            .set_json(json!({ "title": "Modal Logic" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/registrations/{}", registration["id"]))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["courseTitle"], json!("Logic"));
}

#[actix_rt::test]
async fn identifiers_are_never_reused() {
    let app = init_app(false).await;
    let first = create_student(&app, "Ada", "ada@example.com").await;
    let second = create_student(&app, "Grace", "grace@example.com").await;

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/students/{second}"))
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let third = create_student(&app, "Edsger", "edsger@example.com").await;
    assert!(first < second && second < third);
}

#[actix_rt::test]
async fn duplicate_email_conflicts() {
    let app = init_app(false).await;
    create_student(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(json!({
                "name": "Impostor",
                "email": "ada@example.com",
                "password": "other",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("conflict"));
}

#[actix_rt::test]
async fn responses_never_expose_password_material() {
    let app = init_app(false).await;
    let ada = create_student(&app, "Ada", "ada@example.com").await;

    for uri in ["/api/students".to_owned(), format!("/api/students/{ada}")] {
        let (status, body) = send(
            &app,
            test::TestRequest::get()
                .uri(&uri)
                .insert_header(basic("ada@example.com")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let text = body.to_string();
        assert!(!text.contains("password"), "{uri} leaked: {text}");
        assert!(!text.contains("$argon2"), "{uri} leaked: {text}");
    }
}

#[actix_rt::test]
async fn password_change_takes_effect_for_authentication() {
    let app = init_app(false).await;
    let ada = create_student(&app, "Ada", "ada@example.com").await;

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/students/{ada}"))
            .insert_header(basic("ada@example.com"))
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "new secret",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (old, _) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/students")
            .insert_header(basic("ada@example.com")),
    )
    .await;
    assert_eq!(old, StatusCode::UNAUTHORIZED);

    let (new, _) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/students")
            .insert_header(basic_with("ada@example.com", "new secret")),
    )
    .await;
    assert_eq!(new, StatusCode::OK);
}
