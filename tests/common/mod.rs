#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use talent_registry::api::handlers::health_handler;
use talent_registry::api::routes::api_routes;
use talent_registry::infrastructure::memory::MemoryPersistence;
use talent_registry::state::AppState;

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(MemoryPersistence::new()))
}

/// Full API over a fresh in-memory store.
pub fn make_server() -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(create_test_state());

    TestServer::new(app).unwrap()
}

pub async fn create_skill(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/skills")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_candidate(
    server: &TestServer,
    full_name: &str,
    email: &str,
    skills: &[&str],
) -> Value {
    let response = server
        .post("/api/candidates")
        .json(&json!({
            "full_name": full_name,
            "date_of_birth": "1990-01-01",
            "email": email,
            "skills": skills,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
