mod common;

use axum::http::{StatusCode, header};
use common::{
    admin_token, body_json, create_section, create_student, enroll, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_and_get_enrollment(pool: PgPool) {
    let app = setup_test_app(pool);
    let student_id = create_student(&app, "Ana Lima", 1).await;
    let section_id = create_section(&app, "Algebra").await;

    let response = enroll(&app, student_id, section_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    assert_eq!(location, format!("/api/matriculas/{}", created["id"]));

    let response = send(&app, "GET", &location, Some(&admin_token()), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["student"]["id"], student_id);
    assert_eq!(body["student"]["name"], "Ana Lima");
    assert_eq!(body["section"]["name"], "Algebra");
    assert_eq!(body["enrolled_at"], created["enrolled_at"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_enrollment(pool: PgPool) {
    let app = setup_test_app(pool);
    let student_id = create_student(&app, "Ana Lima", 1).await;
    let section_id = create_section(&app, "Algebra").await;

    assert_eq!(enroll(&app, student_id, section_id).await.status(), StatusCode::CREATED);

    let response = enroll(&app, student_id, section_id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["kind"], "duplicate");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_concurrent_duplicate_enrollment(pool: PgPool) {
    let app = setup_test_app(pool);
    let student_id = create_student(&app, "Ana Lima", 1).await;
    let section_id = create_section(&app, "Algebra").await;

    let (a, b) = tokio::join!(
        enroll(&app, student_id, section_id),
        enroll(&app, student_id, section_id),
    );

    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_enrollment_with_missing_references(pool: PgPool) {
    let app = setup_test_app(pool);
    let student_id = create_student(&app, "Ana Lima", 1).await;
    let section_id = create_section(&app, "Algebra").await;

    let response = enroll(&app, 4242, section_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = enroll(&app, student_id, 4242).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_roster_is_ordered_by_name(pool: PgPool) {
    let app = setup_test_app(pool);
    let section_id = create_section(&app, "Algebra").await;
    for (n, name) in ["Zeca", "Ana", "Bruno"].iter().enumerate() {
        let student_id = create_student(&app, name, n as u32 + 1).await;
        assert_eq!(enroll(&app, student_id, section_id).await.status(), StatusCode::CREATED);
    }

    let response = send(
        &app,
        "GET",
        &format!("/api/matriculas/turma/{}", section_id),
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["section_id"], section_id);
    assert_eq!(body["section_name"], "Algebra");
    let names: Vec<_> = body["students"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ana", "Bruno", "Zeca"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_roster_of_missing_section(pool: PgPool) {
    let app = setup_test_app(pool);
    let response = send(
        &app,
        "GET",
        "/api/matriculas/turma/4242",
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_enrollments_ordered_by_id(pool: PgPool) {
    let app = setup_test_app(pool);
    let algebra = create_section(&app, "Algebra").await;
    let physics = create_section(&app, "Physics").await;
    let ana = create_student(&app, "Ana Lima", 1).await;
    let bruno = create_student(&app, "Bruno Reis", 2).await;

    enroll(&app, bruno, physics).await;
    enroll(&app, ana, algebra).await;
    enroll(&app, ana, physics).await;

    let response = send(&app, "GET", "/api/matriculas", Some(&admin_token()), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    let ids: Vec<_> = items.iter().map(|e| e["id"].as_i64().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(items[0]["student"]["name"], "Bruno Reis");
    assert_eq!(items[0]["section"]["enrollment_count"], 2);
    assert_eq!(items[1]["section"]["enrollment_count"], 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_enrollment_preserves_timestamp(pool: PgPool) {
    let app = setup_test_app(pool);
    let ana = create_student(&app, "Ana Lima", 1).await;
    let algebra = create_section(&app, "Algebra").await;
    let physics = create_section(&app, "Physics").await;

    let created = body_json(enroll(&app, ana, algebra).await).await;
    let uri = format!("/api/matriculas/{}", created["id"]);

    let response = send(
        &app,
        "PUT",
        &uri,
        Some(&admin_token()),
        Some(json!({ "student_id": ana, "section_id": physics })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["section_id"], physics);
    assert_eq!(updated["enrolled_at"], created["enrolled_at"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_into_existing_pair_is_duplicate(pool: PgPool) {
    let app = setup_test_app(pool);
    let ana = create_student(&app, "Ana Lima", 1).await;
    let algebra = create_section(&app, "Algebra").await;
    let physics = create_section(&app, "Physics").await;

    enroll(&app, ana, algebra).await;
    let second = body_json(enroll(&app, ana, physics).await).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/matriculas/{}", second["id"]),
        Some(&admin_token()),
        Some(json!({ "student_id": ana, "section_id": algebra })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        "PUT",
        "/api/matriculas/4242",
        Some(&admin_token()),
        Some(json!({ "student_id": ana, "section_id": algebra })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_delete_enrollment(pool: PgPool) {
    let app = setup_test_app(pool);
    let ana = create_student(&app, "Ana Lima", 1).await;
    let algebra = create_section(&app, "Algebra").await;
    let created = body_json(enroll(&app, ana, algebra).await).await;
    let uri = format!("/api/matriculas/{}", created["id"]);

    let response = send(&app, "DELETE", &uri, Some(&admin_token()), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", &uri, Some(&admin_token()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
