//! HTTP-level integration tests for the complaint lifecycle: filing with
//! the room-registration precondition, snapshot fields, listing, and the
//! resolve/decline terminal transitions.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, get_auth, login_user, multipart_body, post_empty_auth,
    post_multipart_auth, put_json_auth, FailingBlobStore,
};
use sqlx::PgPool;

use dormhub_core::approval::APPROVAL_APPROVED;
use dormhub_core::complaint::{STATUS_DECLINED, STATUS_PENDING, STATUS_RESOLVED};
use dormhub_core::roles::{ROLE_ADMIN, ROLE_STUDENT};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a student, log them in, and register their room details.
/// Returns the student's access token.
async fn registered_student(pool: &PgPool, email: &str, username: &str, room_no: &str) -> String {
    let (_user, password) =
        create_test_user(pool, email, username, ROLE_STUDENT, APPROVAL_APPROVED).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, email, &password).await;
    let token = login_json["access_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let details = serde_json::json!({
        "name": username,
        "roll_no": "R-100",
        "room_no": room_no,
        "email": email,
    });
    let response = put_json_auth(app, "/api/v1/students/me", details, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    token
}

/// Create an admin and return their access token.
async fn admin_token(pool: &PgPool, email: &str, username: &str) -> String {
    let (_user, password) =
        create_test_user(pool, email, username, ROLE_ADMIN, APPROVAL_APPROVED).await;
    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, email, &password).await;
    login_json["access_token"].as_str().unwrap().to_string()
}

/// File a complaint through the API and return its JSON representation.
async fn file_complaint(pool: &PgPool, token: &str, title: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = multipart_body(&[("title", title), ("description", "it is broken")], None);
    let response = post_multipart_auth(app, "/api/v1/complaints", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Filing
// ---------------------------------------------------------------------------

/// Filing without a room registration fails the precondition.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_file_without_registration_is_precondition_failure(pool: PgPool) {
    let (_user, password) =
        create_test_user(&pool, "s@hostel.test", "s", ROLE_STUDENT, APPROVAL_APPROVED).await;
    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "s@hostel.test", &password).await;
    let token = login_json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = multipart_body(&[("title", "Leaky tap"), ("description", "...")], None);
    let response = post_multipart_auth(app, "/api/v1/complaints", body, token).await;
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM complaints")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "no complaint row may be created");
}

/// Filing snapshots the student's name and room; later edits to the
/// registration do not rewrite past complaints.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_file_snapshots_student_details(pool: PgPool) {
    let token = registered_student(&pool, "snap@hostel.test", "snapper", "204").await;

    let complaint = file_complaint(&pool, &token, "Leaky tap").await;
    assert_eq!(complaint["status"], STATUS_PENDING);
    assert_eq!(complaint["student_name"], "snapper");
    assert_eq!(complaint["room_no"], "204");

    // The student moves rooms.
    let app = common::build_test_app(pool.clone());
    let details = serde_json::json!({
        "name": "snapper",
        "roll_no": "R-100",
        "room_no": "318",
        "email": "snap@hostel.test",
    });
    let response = put_json_auth(app, "/api/v1/students/me", details, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old complaint still shows the room it was filed from.
    let room: (String,) = sqlx::query_as("SELECT room_no FROM complaints WHERE id = $1")
        .bind(complaint["id"].as_i64().unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(room.0, "204");
}

/// Filing with an image stores the blob and records its public URL.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_file_with_image_records_public_url(pool: PgPool) {
    let token = registered_student(&pool, "img@hostel.test", "img", "101").await;

    let app = common::build_test_app(pool.clone());
    let body = multipart_body(
        &[("title", "Broken window"), ("description", "glass everywhere")],
        Some(("image", "window.jpg", b"fake-jpeg-bytes")),
    );
    let response = post_multipart_auth(app, "/api/v1/complaints", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let url = json["data"]["complaint_image_url"].as_str().unwrap();
    assert!(
        url.contains("complaint-images/"),
        "URL should point into the complaint-images bucket, got {url}"
    );
    assert!(url.ends_with(".jpg"), "extension is taken from the file name");
}

/// Filing is all-or-nothing: when the image upload fails, no row is created.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_file_with_failing_upload_creates_nothing(pool: PgPool) {
    let token = registered_student(&pool, "fail@hostel.test", "fail", "102").await;

    let app = common::build_test_app_with_store(pool.clone(), Arc::new(FailingBlobStore));
    let body = multipart_body(
        &[("title", "Leaky tap"), ("description", "...")],
        Some(("image", "tap.png", b"fake-png-bytes")),
    );
    let response = post_multipart_auth(app, "/api/v1/complaints", body, &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM complaints")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "the filing must be all-or-nothing");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// `mine` returns only the caller's complaints, newest first; admins see all.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_scope_and_order(pool: PgPool) {
    let alice = registered_student(&pool, "alice@hostel.test", "alice", "201").await;
    let bob = registered_student(&pool, "bob@hostel.test", "bob", "202").await;

    file_complaint(&pool, &alice, "first").await;
    file_complaint(&pool, &alice, "second").await;
    file_complaint(&pool, &bob, "other").await;

    // Alice sees exactly her two complaints, newest-created-first.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/complaints/mine", &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mine = body_json(response).await["data"].clone();
    let titles: Vec<&str> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);

    // Students cannot read the global list.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/complaints", &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admins see all three.
    let admin = admin_token(&pool, "warden@hostel.test", "warden").await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/complaints", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let all = body_json(response).await["data"].clone();
    assert_eq!(all.as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Resolve / decline
// ---------------------------------------------------------------------------

/// Resolving stamps the resolver, timestamp, and resolution text.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_resolve_stamps_resolution(pool: PgPool) {
    let student = registered_student(&pool, "s@hostel.test", "s", "204").await;
    let complaint = file_complaint(&pool, &student, "Leaky tap").await;
    let id = complaint["id"].as_i64().unwrap();

    let admin = admin_token(&pool, "warden@hostel.test", "warden").await;
    let app = common::build_test_app(pool.clone());
    let body = multipart_body(&[("description", "Replaced the washer")], None);
    let response =
        post_multipart_auth(app, &format!("/api/v1/complaints/{id}/resolve"), body, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, desc, resolved_by): (String, Option<String>, Option<i64>) = sqlx::query_as(
        "SELECT status, resolution_description, resolved_by FROM complaints WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, STATUS_RESOLVED);
    assert_eq!(desc.as_deref(), Some("Replaced the washer"));
    assert!(resolved_by.is_some());

    let resolved_at: (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT resolved_at FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(resolved_at.0.is_some());
}

/// Resolving with an empty description is a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_resolve_requires_description(pool: PgPool) {
    let student = registered_student(&pool, "s@hostel.test", "s", "204").await;
    let complaint = file_complaint(&pool, &student, "Leaky tap").await;
    let id = complaint["id"].as_i64().unwrap();

    let admin = admin_token(&pool, "warden@hostel.test", "warden").await;
    let app = common::build_test_app(pool.clone());
    let body = multipart_body(&[("description", "   ")], None);
    let response =
        post_multipart_auth(app, &format!("/api/v1/complaints/{id}/resolve"), body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status,): (String,) = sqlx::query_as("SELECT status FROM complaints WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, STATUS_PENDING);
}

/// A failing resolution-image upload does not fail the resolution; the
/// complaint resolves without an image.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_resolve_with_failing_upload_still_resolves(pool: PgPool) {
    let student = registered_student(&pool, "s@hostel.test", "s", "204").await;
    let complaint = file_complaint(&pool, &student, "Leaky tap").await;
    let id = complaint["id"].as_i64().unwrap();

    let admin = admin_token(&pool, "warden@hostel.test", "warden").await;
    let app = common::build_test_app_with_store(pool.clone(), Arc::new(FailingBlobStore));
    let body = multipart_body(
        &[("description", "Fixed it anyway")],
        Some(("image", "proof.jpg", b"fake-jpeg")),
    );
    let response =
        post_multipart_auth(app, &format!("/api/v1/complaints/{id}/resolve"), body, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, image_url): (String, Option<String>) =
        sqlx::query_as("SELECT status, resolution_image_url FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, STATUS_RESOLVED);
    assert!(image_url.is_none(), "resolution proceeds without the image");
}

/// Declining is terminal and needs no text.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_decline_is_terminal(pool: PgPool) {
    let student = registered_student(&pool, "s@hostel.test", "s", "204").await;
    let complaint = file_complaint(&pool, &student, "Noisy neighbor").await;
    let id = complaint["id"].as_i64().unwrap();

    let admin = admin_token(&pool, "warden@hostel.test", "warden").await;
    let app = common::build_test_app(pool.clone());
    let response =
        post_empty_auth(app, &format!("/api/v1/complaints/{id}/decline"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // A second decision on the same complaint loses the race and conflicts.
    let app = common::build_test_app(pool.clone());
    let body = multipart_body(&[("description", "too late")], None);
    let response =
        post_multipart_auth(app, &format!("/api/v1/complaints/{id}/resolve"), body, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let (status,): (String,) = sqlx::query_as("SELECT status FROM complaints WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, STATUS_DECLINED, "the terminal state must not change");
}

/// Deciding on a complaint that never existed is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_decline_nonexistent_is_not_found(pool: PgPool) {
    let admin = admin_token(&pool, "warden@hostel.test", "warden").await;
    let app = common::build_test_app(pool);
    let response = post_empty_auth(app, "/api/v1/complaints/9999/decline", &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Students cannot resolve or decline.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_students_cannot_decide(pool: PgPool) {
    let student = registered_student(&pool, "s@hostel.test", "s", "204").await;
    let complaint = file_complaint(&pool, &student, "Leaky tap").await;
    let id = complaint["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response =
        post_empty_auth(app, &format!("/api/v1/complaints/{id}/decline"), &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
