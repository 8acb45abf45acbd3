//! Integration tests for the admin dashboard counters.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, get_auth, login_user, multipart_body, post_json,
    post_multipart_auth, put_json_auth,
};
use sqlx::PgPool;

use dormhub_core::approval::APPROVAL_APPROVED;
use dormhub_core::roles::{ROLE_ADMIN, ROLE_STUDENT};

/// The stats endpoint aggregates students, complaint statuses, and alerts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_counts(pool: PgPool) {
    // One registered student with two complaints, one resolved.
    let (_s, student_pw) =
        create_test_user(&pool, "s@hostel.test", "s", ROLE_STUDENT, APPROVAL_APPROVED).await;
    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "s@hostel.test", &student_pw).await;
    let student = login_json["access_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let details = serde_json::json!({
        "name": "s", "roll_no": "R-1", "room_no": "204", "email": "s@hostel.test",
    });
    put_json_auth(app, "/api/v1/students/me", details, &student).await;

    for title in ["one", "two"] {
        let app = common::build_test_app(pool.clone());
        let body = multipart_body(&[("title", title), ("description", "d")], None);
        let response = post_multipart_auth(app, "/api/v1/complaints", body, &student).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (_a, admin_pw) =
        create_test_user(&pool, "warden@hostel.test", "warden", ROLE_ADMIN, APPROVAL_APPROVED)
            .await;
    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "warden@hostel.test", &admin_pw).await;
    let admin = login_json["access_token"].as_str().unwrap().to_string();

    // Resolve complaint "one".
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM complaints WHERE title = 'one'")
        .fetch_one(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());
    let body = multipart_body(&[("description", "done")], None);
    post_multipart_auth(app, &format!("/api/v1/complaints/{id}/resolve"), body, &admin).await;

    // One anonymous SOS alert.
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/sos", serde_json::json!({ "room_no": "204" })).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/dashboard/stats", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await["data"].clone();
    assert_eq!(stats["students"], 1);
    assert_eq!(stats["pending_complaints"], 1);
    assert_eq!(stats["resolved_complaints"], 1);
    assert_eq!(stats["sos_alerts"], 1);

    // Students cannot read the dashboard.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard/stats", &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
