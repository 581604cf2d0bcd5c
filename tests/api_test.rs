mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use books4all::auth::create_jwt;
use books4all::domain::FixedDistance;
use books4all::{seed, server};
use common::setup_state;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn setup_app(with_demo: bool) -> Router {
    let state = setup_state(Arc::new(FixedDistance(10.0))).await;
    seed::ensure_operator(state.db(), "admin", "admin")
        .await
        .expect("Failed to create operator");
    if with_demo {
        seed::seed_demo_data(state.db())
            .await
            .expect("Failed to seed");
    }
    server::build_router(state, &[])
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "admin", "password": "admin" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = setup_app(false).await;
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = setup_app(false).await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "admin", "password": "nope" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_operator_routes_require_token() {
    let app = setup_app(true).await;

    let (status, _) = send(&app, json_request("POST", "/api/matching/run", None, json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/matching/run", Some("garbage"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let viewer = create_jwt("bob", "viewer").unwrap();
    let (status, body) = send(
        &app,
        json_request("PUT", "/api/matches/1/status", Some(viewer.as_str()), json!({ "status": "Delivered" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Operator role required");
}

#[tokio::test]
async fn test_demo_matching_flow() {
    let app = setup_app(true).await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/matching/run", Some(token.as_str()), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "matched");
    assert_eq!(body["matches_created"], 2);

    let matches = body["matches"].as_array().unwrap();
    let math = matches
        .iter()
        .find(|m| m["book_title"] == "Math Textbook Grade 5")
        .unwrap();
    assert_eq!(math["matched_qty"], 8);
    assert_eq!(math["donor_name"], "John Donor");
    assert_eq!(math["school_name"], "City Elementary School");
    let science = matches
        .iter()
        .find(|m| m["book_title"] == "Science Encyclopedia")
        .unwrap();
    assert_eq!(science["matched_qty"], 3);
    assert_eq!(science["school_name"], "Rural High School");

    // Both requests are now fulfilled
    let (status, body) = send(
        &app,
        json_request("POST", "/api/matching/run", Some(token.as_str()), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "nothing_to_match");
    assert_eq!(body["matches_created"], 0);

    let (_, body) = send(&app, get("/api/books?kind=request&active=true")).await;
    assert_eq!(body["total"], 0);
    let (_, body) = send(&app, get("/api/books?kind=donation&active=true")).await;
    assert_eq!(body["total"], 3);

    // City Elementary School is the first school seeded
    let (_, schools) = send(&app, get("/api/users?role=school")).await;
    let school_id = schools["users"][0]["id"].as_i64().unwrap();
    let (status, view) = send(&app, get(&format!("/api/schools/{}/matches", school_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view.as_array().unwrap().len(), 1);
    assert_eq!(view[0]["donor_name"], "John Donor");
    assert_eq!(view[0]["status"], "Pending");

    let match_id = math["match_id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/matches/{}/status", match_id),
            Some(token.as_str()),
            json!({ "status": "Delivered" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match_id"], match_id);
    assert_eq!(body["status"], "Delivered");

    let (_, school) = send(&app, get(&format!("/api/users/{}", school_id))).await;
    assert_eq!(school["books_received"], 13);

    let (_, donors) = send(&app, get("/api/users?role=donor")).await;
    let donor_id = donors["users"][0]["id"].as_i64().unwrap();
    let (status, view) = send(&app, get(&format!("/api/donors/{}/matches", donor_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view[0]["school_name"], "City Elementary School");
    assert_eq!(view[0]["status"], "Delivered");
}

#[tokio::test]
async fn test_status_update_errors() {
    let app = setup_app(true).await;
    let token = login(&app).await;
    send(
        &app,
        json_request("POST", "/api/matching/run", Some(token.as_str()), json!({})),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/matches/1/status", Some(token.as_str()), json!({ "status": "Shipped" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Must be one of"));

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/matches/1/status", Some(token.as_str()), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/matches/999/status", Some(token.as_str()), json!({ "status": "Delivered" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Match not found");
}

#[tokio::test]
async fn test_registration_and_listing_validation() {
    let app = setup_app(false).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            None,
            json!({ "name": "X", "email": "x@example.com", "role": "admin" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            None,
            json!({ "name": "X", "email": "x@example.com", "role": "school", "rating": 9 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, donor) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            None,
            json!({
                "name": "Dana",
                "email": "dana@example.com",
                "address": "1 Donor Rd",
                "role": "Donor",
                "rating": 4
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(donor["role"], "donor");
    let donor_id = donor["id"].as_i64().unwrap();

    let listing = |is_donation: bool, quantity: i32| {
        json!({
            "owner_id": donor_id,
            "is_donation": is_donation,
            "title": "Atlas",
            "grade_level": "Middle",
            "language": "English",
            "quantity": quantity
        })
    };

    let (status, _) = send(&app, json_request("POST", "/api/books", None, listing(true, 0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Donors cannot post requests
    let (status, _) = send(&app, json_request("POST", "/api/books", None, listing(false, 2))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, book) = send(&app, json_request("POST", "/api/books", None, listing(true, 2))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["fulfilled_qty"], 0);

    let (status, _) = send(&app, get("/api/users/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/api/books/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/api/schools/999/matches")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/api/books?kind=gift")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = setup_app(false).await;
    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/matching/run"].is_object());
}
