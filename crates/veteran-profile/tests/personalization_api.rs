use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use veteran_profile::config::PersonalizationConfig;
use veteran_profile::personalization::{personalization_router, VeteranPersonalizationSystem};
use veteran_profile::vocabulary::Vocabulary;

fn app() -> axum::Router {
    let vocabulary = Arc::new(Vocabulary::standard().expect("embedded vocabulary parses"));
    let system = VeteranPersonalizationSystem::in_memory(vocabulary, &PersonalizationConfig::default())
        .expect("system builds");
    personalization_router(Arc::new(system))
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request handled");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let payload = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json payload")
    };
    (status, payload)
}

fn post(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("encode")))
        .expect("request")
}

#[tokio::test]
async fn military_family_journey() {
    let app = app();

    let (status, experience) = send(
        &app,
        post(
            "/api/v1/veterans/sessions",
            json!({ "text": "my spouse is active duty Navy", "session_id": "family-1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(experience["profile"]["is_veteran"], false);
    assert_eq!(experience["profile"]["priority_level"], "FAMILY");
    assert_eq!(experience["personalized_content"]["pricing"]["base_discount"], 5);

    let (status, quote) = send(
        &app,
        post(
            "/api/v1/veterans/sessions/family-1/discounts",
            json!({ "amount": 1000, "project_details": { "type": "deck" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["total_savings"].as_f64(), Some(50.0));
    assert_eq!(quote["applied_discounts"][0]["id"], "military_family");

    let (status, contact) = send(
        &app,
        post(
            "/api/v1/veterans/sessions/family-1/specialist",
            json!({ "urgency": "priority", "message": "call after 5pm" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contact["assigned_specialist"]["id"], "general001");
    assert_eq!(contact["expected_response"], "48-72 hours");
}

#[tokio::test]
async fn veteran_estimate_form_returns_priority_handling() {
    let app = app();

    send(
        &app,
        post(
            "/api/v1/veterans/sessions",
            json!({ "text": "marine combat veteran, iraq", "session_id": "marine-1" }),
        ),
    )
    .await;

    let (status, result) = send(
        &app,
        post(
            "/api/v1/veterans/sessions/marine-1/forms",
            json!({
                "form_type": "estimate",
                "form_data": { "budget_range": "$25K-$50K", "timeline": "asap" }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["response"]["veteran_recognition"], true);
    assert_eq!(result["priority_handling"]["priority_level"], "IMMEDIATE");
    assert!(result["veteran_benefits"]["discounts"].is_array());
    assert_eq!(
        result["next_steps"][0],
        "IMMEDIATE PRIORITY: Veteran specialist will contact you within 4 hours"
    );

    let (status, session) = send(
        &app,
        Request::get("/api/v1/veterans/sessions/marine-1")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["context"]["budget_indicated"], "$25K-$50K");
}

#[tokio::test]
async fn profiles_endpoint_is_idempotent_for_same_input() {
    let app = app();
    let body = json!({ "text": "Coast Guard veteran, 12 years of service" });

    let (_, first) = send(&app, post("/api/v1/veterans/profiles", body.clone())).await;
    let (_, second) = send(&app, post("/api/v1/veterans/profiles", body)).await;
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["service_branch"], "Coast Guard");
    assert_eq!(first["years_of_service"], 12);
}
