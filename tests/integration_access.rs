//! Router-level access control. None of these requests reach the database.

mod common;

use axum::http::StatusCode;
use classroll_auth::{Role, encode_claims, issue_claims};
use common::{admin_token, body_json, send, setup_lazy_app, student_token, test_jwt_config};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = setup_lazy_app();
    let response = send(&app, "GET", "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = setup_lazy_app();
    let response = send(&app, "GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    for path in [
        "/api/auth/login",
        "/api/alunos",
        "/api/alunos/{id}",
        "/api/alunos/GetUserInfo",
        "/api/turmas",
        "/api/matriculas",
        "/api/matriculas/turma/{section_id}",
    ] {
        assert!(body["paths"].get(path).is_some(), "missing {}", path);
    }
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup_lazy_app();

    for uri in ["/api/alunos", "/api/turmas", "/api/matriculas", "/api/alunos/GetUserInfo"] {
        let response = send(&app, "GET", uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body_json(response).await["kind"], "unauthorized");
    }
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = setup_lazy_app();
    let request = axum::http::Request::builder()
        .uri("/api/alunos/GetUserInfo")
        .header("authorization", format!("Basic {}", student_token(5)))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = setup_lazy_app();
    let jwt_config = test_jwt_config();
    let mut claims = issue_claims(1, "admin@classroll.dev", Role::Administrator, &jwt_config);
    claims.iat -= 10_000;
    claims.exp = claims.iat + 60;
    let token = encode_claims(&claims, &jwt_config).unwrap();

    let response = send(&app, "GET", "/api/alunos/GetUserInfo", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_issuer_is_unauthorized() {
    let app = setup_lazy_app();
    let mut jwt_config = test_jwt_config();
    jwt_config.issuer = "somebody-else".to_string();
    let claims = issue_claims(1, "admin@classroll.dev", Role::Administrator, &jwt_config);
    let token = encode_claims(&claims, &jwt_config).unwrap();

    let response = send(&app, "GET", "/api/alunos/GetUserInfo", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_info_reads_token_only() {
    let app = setup_lazy_app();
    let response = send(
        &app,
        "GET",
        "/api/alunos/GetUserInfo",
        Some(&student_token(5)),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user_id"], 5);
    assert_eq!(body["role"], "Student");
    assert_eq!(body["email"], "student5@example.com");
}

#[tokio::test]
async fn test_student_cannot_write_students_or_sections() {
    let app = setup_lazy_app();
    let token = student_token(5);

    let response = send(
        &app,
        "POST",
        "/api/alunos",
        Some(&token),
        Some(common::student_payload("Someone", 1)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["kind"], "forbidden");

    let response = send(
        &app,
        "POST",
        "/api/turmas",
        Some(&token),
        Some(json!({ "name": "Algebra" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, "DELETE", "/api/turmas/3", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, "DELETE", "/api/alunos/9", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_enrollment_routes_are_administrator_only() {
    let app = setup_lazy_app();
    let token = student_token(5);

    for (method, uri) in [
        ("GET", "/api/matriculas"),
        ("GET", "/api/matriculas/1"),
        ("GET", "/api/matriculas/turma/1"),
        ("DELETE", "/api/matriculas/1"),
    ] {
        let response = send(&app, method, uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{} {}", method, uri);
    }

    let response = send(
        &app,
        "POST",
        "/api/matriculas",
        Some(&token),
        Some(json!({ "student_id": 5, "section_id": 1 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bootstrap_administrator_cannot_be_deleted() {
    let app = setup_lazy_app();
    let response = send(&app, "DELETE", "/api/alunos/1", Some(&admin_token()), None).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["kind"], "forbidden");
}

#[tokio::test]
async fn test_bootstrap_administrator_cannot_be_demoted() {
    let app = setup_lazy_app();
    let response = send(
        &app,
        "PUT",
        "/api/alunos/1",
        Some(&admin_token()),
        Some(json!({
            "name": "Root Admin",
            "birth_date": "1990-01-01",
            "national_id": "52998224725",
            "email": "admin@classroll.dev",
            "is_admin": false
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["kind"], "forbidden");
}

#[tokio::test]
async fn test_names_wider_than_the_column_are_invalid_argument() {
    let app = setup_lazy_app();
    let long_name = "a".repeat(201);

    let mut student = common::student_payload(&long_name, 1);
    student["email"] = json!("  Student1@Example.com ");
    let response = send(&app, "POST", "/api/alunos", Some(&admin_token()), Some(student)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_argument");
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"].get("email").is_none());

    let response = send(
        &app,
        "POST",
        "/api/turmas",
        Some(&admin_token()),
        Some(json!({ "name": long_name })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_argument");
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn test_short_section_name_is_invalid_argument() {
    let app = setup_lazy_app();
    let response = send(
        &app,
        "POST",
        "/api/turmas",
        Some(&admin_token()),
        Some(json!({ "name": "  ab  " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_argument");
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn test_student_field_errors_are_reported() {
    let app = setup_lazy_app();
    let response = send(
        &app,
        "POST",
        "/api/alunos",
        Some(&admin_token()),
        Some(json!({
            "name": "Al",
            "birth_date": "2001-01-01",
            "national_id": "123",
            "email": "not-an-email",
            "password": "Str0ng!pass"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_argument");
    for field in ["name", "national_id", "email"] {
        assert!(body["errors"][field].is_array(), "missing {}", field);
    }
}

#[tokio::test]
async fn test_malformed_json_is_invalid_argument() {
    let app = setup_lazy_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/turmas")
        .header("authorization", format!("Bearer {}", admin_token()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["kind"], "invalid_argument");
}

#[tokio::test]
async fn test_login_validation_runs_before_lookup() {
    let app = setup_lazy_app();
    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nope", "password": "" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
