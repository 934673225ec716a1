mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn skill_names(candidate: &Value) -> Vec<&str> {
    candidate["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect()
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_candidate_success() {
    let server = common::make_server();
    common::create_skill(&server, "Rust").await;

    let response = server
        .post("/api/candidates")
        .json(&json!({
            "full_name": "  Ada Lovelace ",
            "date_of_birth": "1990-01-01",
            "email": " Ada@Example.COM ",
            "contact_number": " +44 20 7946 0000 ",
            "skills": ["Rust", "Cobol"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["full_name"], "Ada Lovelace");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["contact_number"], "+44 20 7946 0000");
    assert_eq!(json["date_of_birth"], "1990-01-01");
    assert_eq!(skill_names(&json), vec!["Rust"]);
}

#[tokio::test]
async fn test_create_candidate_invalid_email() {
    let server = common::make_server();

    let response = server
        .post("/api/candidates")
        .json(&json!({
            "full_name": "Ada Lovelace",
            "date_of_birth": "1990-01-01",
            "email": "not-an-email"
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_candidate_oversized_email_is_not_echoed_in_full() {
    let server = common::make_server();
    let oversized = format!("{}@example.com", "a".repeat(4_000));

    let response = server
        .post("/api/candidates")
        .json(&json!({
            "full_name": "Ada Lovelace",
            "date_of_birth": "1990-01-01",
            "email": oversized
        }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    let echoed = json["error"]["details"]["email"].as_str().unwrap();
    assert!(echoed.len() < 100, "echoed {} bytes", echoed.len());
    assert!(echoed.ends_with("..."));
}

#[tokio::test]
async fn test_create_candidate_underage() {
    let server = common::make_server();

    let response = server
        .post("/api/candidates")
        .json(&json!({
            "full_name": "Young Person",
            "date_of_birth": chrono::Utc::now().date_naive().to_string(),
            "email": "young@example.com"
        }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["min_age"], 18);
}

#[tokio::test]
async fn test_create_candidate_email_conflict_ignores_case() {
    let server = common::make_server();
    common::create_candidate(&server, "First", "x@y.com", &[]).await;

    let response = server
        .post("/api/candidates")
        .json(&json!({
            "full_name": "Second",
            "date_of_birth": "1990-01-01",
            "email": "X@Y.com"
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_and_list_candidates() {
    let server = common::make_server();
    let ada = common::create_candidate(&server, "Ada", "ada@example.com", &[]).await;
    common::create_candidate(&server, "Grace", "grace@example.com", &[]).await;

    let response = server.get(&format!("/api/candidates/{}", ada["id"])).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], "ada@example.com");

    let response = server.get("/api/candidates").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_candidate_not_found() {
    let server = common::make_server();

    let response = server.get("/api/candidates/999").await;

    response.assert_status_not_found();
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_candidate_replaces_skills() {
    let server = common::make_server();
    common::create_skill(&server, "Go").await;
    common::create_skill(&server, "SQL").await;
    let ada = common::create_candidate(&server, "Ada", "ada@example.com", &["Go"]).await;

    let response = server
        .put(&format!("/api/candidates/{}", ada["id"]))
        .json(&json!({
            "full_name": "Ada King",
            "date_of_birth": "1990-01-01",
            "skills": ["SQL"]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["full_name"], "Ada King");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(skill_names(&json), vec!["SQL"]);
}

#[tokio::test]
async fn test_update_candidate_not_found() {
    let server = common::make_server();

    let response = server
        .put("/api/candidates/999")
        .json(&json!({
            "full_name": "Nobody",
            "date_of_birth": "1990-01-01"
        }))
        .await;

    response.assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_candidate() {
    let server = common::make_server();
    let ada = common::create_candidate(&server, "Ada", "ada@example.com", &[]).await;

    let response = server.delete(&format!("/api/candidates/{}", ada["id"])).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.delete(&format!("/api/candidates/{}", ada["id"])).await;
    response.assert_status_not_found();
}

// ─── SKILLS & SEARCH ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_skill_assignment_and_search_flow() {
    let server = common::make_server();
    let go = common::create_skill(&server, "Go").await;
    let ada =
        common::create_candidate(&server, "Ada Lovelace", "ada@example.com", &[]).await;
    let path = format!("/api/candidates/{}/skills/{}", ada["id"], go);

    let response = server.post(&path).await;
    response.assert_status_ok();
    assert_eq!(skill_names(&response.json::<Value>()), vec!["Go"]);

    let response = server.post(&path).await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");

    let response = server
        .get("/api/candidates/search")
        .add_query_param("skills", "Go")
        .await;
    response.assert_status_ok();
    let found = response.json::<Value>();
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], ada["id"]);

    let response = server.delete(&path).await;
    response.assert_status_ok();
    assert!(skill_names(&response.json::<Value>()).is_empty());

    let response = server
        .get("/api/candidates/search")
        .add_query_param("skills", "Go")
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_assign_unknown_skill_not_found() {
    let server = common::make_server();
    let ada = common::create_candidate(&server, "Ada", "ada@example.com", &[]).await;

    let response = server
        .post(&format!("/api/candidates/{}/skills/999", ada["id"]))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_search_any_of_skills_and_name() {
    let server = common::make_server();
    common::create_skill(&server, "Go").await;
    common::create_skill(&server, "Rust").await;
    common::create_candidate(&server, "Ada Lovelace", "ada@example.com", &["Go"]).await;
    common::create_candidate(&server, "Grace Hopper", "grace@example.com", &["Rust"]).await;
    common::create_candidate(&server, "Alan Turing", "alan@example.com", &[]).await;

    let response = server
        .get("/api/candidates/search")
        .add_query_param("skills", "Go,Rust")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);

    let response = server
        .get("/api/candidates/search")
        .add_query_param("name", "Hopper")
        .add_query_param("skills", "Go,Rust")
        .await;
    response.assert_status_ok();
    let found = response.json::<Value>();
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["full_name"], "Grace Hopper");

    let response = server.get("/api/candidates/search").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_deleting_skill_unassigns_it() {
    let server = common::make_server();
    let go = common::create_skill(&server, "Go").await;
    let ada = common::create_candidate(&server, "Ada", "ada@example.com", &["Go"]).await;
    assert_eq!(skill_names(&ada), vec!["Go"]);

    server
        .delete(&format!("/api/skills/{}", go))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/candidates/{}", ada["id"])).await;
    response.assert_status_ok();
    assert!(skill_names(&response.json::<Value>()).is_empty());
}
