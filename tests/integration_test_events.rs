mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{AuthSession, TestApp};
use encore_backend::domain::models::user::Role;
use serde_json::{json, Value};

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn date_in(days: i64) -> String {
    (Utc::now() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

async fn organizer(app: &TestApp, email: &str) -> AuthSession {
    let session = app.register_and_login(email, "Organizer", "password123").await;
    app.promote(&session.user_id, Role::Organizer).await;
    app.login(email, "password123").await
}

async fn create_event(app: &TestApp, session: &AuthSession, extra: Value) -> Value {
    let mut payload = json!({
        "title": "Recital",
        "date": date_in(10),
        "time": "19:00:00",
        "location_name": "Stadthalle"
    });
    payload.as_object_mut().unwrap().extend(extra.as_object().unwrap().clone());

    let res = app.request("POST", "/api/v1/events", Some(session), Some(payload)).await;
    assert_eq!(res.status(), StatusCode::OK, "event creation failed");
    parse_body(res).await
}

#[tokio::test]
async fn missing_coordinates_are_geocoded_from_location_name() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    let event = create_event(&app, &org, json!({})).await;
    assert_eq!(event["location_lat"], 48.2082);
    assert_eq!(event["location_lng"], 16.3738);
}

#[tokio::test]
async fn explicit_coordinates_are_kept() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    let event = create_event(&app, &org, json!({"location_lat": 51.5, "location_lng": -0.12})).await;
    assert_eq!(event["location_lat"], 51.5);
    assert_eq!(event["location_lng"], -0.12);
}

#[tokio::test]
async fn payment_instructions_are_validated_at_write_time() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    let empty = json!({
        "title": "T", "date": date_in(5), "time": "19:00:00", "location_name": "Hall",
        "payment_instructions": {}
    });
    let res = app.request("POST", "/api/v1/events", Some(&org), Some(empty)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let blank = json!({
        "title": "T", "date": date_in(5), "time": "19:00:00", "location_name": "Hall",
        "payment_instructions": {"venmo": "   "}
    });
    let res = app.request("POST", "/api/v1/events", Some(&org), Some(blank)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let event = create_event(&app, &org, json!({
        "payment_instructions": {"venmo": "@philharmonia", "paypal": "tickets@philharmonia.org"}
    })).await;
    assert_eq!(event["payment_instructions"]["venmo"], "@philharmonia");
}

#[tokio::test]
async fn duplicate_tier_ids_are_rejected() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    let payload = json!({
        "title": "T", "date": date_in(5), "time": "19:00:00", "location_name": "Hall",
        "price_tiers": [
            {"id": "ga", "name": "GA", "price": "15", "end_date": null},
            {"id": "ga", "name": "GA again", "price": "25", "end_date": null}
        ]
    });
    let res = app.request("POST", "/api/v1/events", Some(&org), Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn viewers_cannot_publish_events() {
    let app = TestApp::new().await;
    let viewer = app.register_and_login("viewer@example.com", "Viewer", "password123").await;

    let payload = json!({
        "title": "T", "date": date_in(5), "time": "19:00:00", "location_name": "Hall"
    });
    let res = app.request("POST", "/api/v1/events", Some(&viewer), Some(payload)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn catalog_filters_and_sorts_server_side() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    create_event(&app, &org, json!({"title": "Gone By", "date": date_in(-3), "location_name": "Berlin Philharmonie"})).await;
    let near = create_event(&app, &org, json!({"title": "Soon", "date": date_in(2), "location_name": "Concert Hall"})).await;
    let far = create_event(&app, &org, json!({"title": "Later", "date": date_in(20), "location_name": "Town Hall Annex"})).await;

    let res = app.request("GET", "/api/v1/events?date=upcoming", None, None).await;
    let upcoming = parse_body(res).await;
    assert_eq!(upcoming.as_array().unwrap().len(), 2);

    let res = app.request("GET", "/api/v1/events?date=upcoming&location=hall&sort=date-desc", None, None).await;
    let body = parse_body(res).await;
    let listed: Vec<&str> = body.as_array().unwrap().iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(listed, vec![far["id"].as_str().unwrap(), near["id"].as_str().unwrap()]);

    let res = app.request("GET", "/api/v1/events?date=past", None, None).await;
    let past = parse_body(res).await;
    assert_eq!(past.as_array().unwrap().len(), 1);
    assert_eq!(past[0]["title"], "Gone By");
}

#[tokio::test]
async fn only_owner_or_admin_may_mutate_an_event() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;
    let event = create_event(&app, &org, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    let other = organizer(&app, "other@example.com").await;
    let res = app.request(
        "PUT", &format!("/api/v1/events/{}", event_id),
        Some(&other), Some(json!({"title": "Hijacked"})),
    ).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request("DELETE", &format!("/api/v1/events/{}", event_id), Some(&other), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin_session = app.register_and_login("admin@example.com", "Admin", "password123").await;
    app.promote(&admin_session.user_id, Role::Admin).await;
    let admin = app.login("admin@example.com", "password123").await;

    let res = app.request(
        "PUT", &format!("/api/v1/events/{}", event_id),
        Some(&admin), Some(json!({"title": "Renamed by admin"})),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["title"], "Renamed by admin");
}

#[tokio::test]
async fn event_detail_lists_its_artists() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    let res = app.request("POST", "/api/v1/artists", Some(&org), Some(json!({
        "name": "Aurora Quartet",
        "bio": "String quartet"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let artist_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let event = create_event(&app, &org, json!({"artist_ids": [artist_id]})).await;

    let res = app.request("GET", &format!("/api/v1/events/{}", event["id"].as_str().unwrap()), None, None).await;
    let detail = parse_body(res).await;
    let artists = detail["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0]["name"], "Aurora Quartet");
}

#[tokio::test]
async fn unknown_artist_reference_is_rejected() {
    let app = TestApp::new().await;
    let org = organizer(&app, "org@example.com").await;

    let payload = json!({
        "title": "T", "date": date_in(5), "time": "19:00:00", "location_name": "Hall",
        "artist_ids": ["no-such-artist"]
    });
    let res = app.request("POST", "/api/v1/events", Some(&org), Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admins_manage_roles_over_http() {
    let app = TestApp::new().await;

    let admin_session = app.register_and_login("root@example.com", "Root", "password123").await;
    app.promote(&admin_session.user_id, Role::Admin).await;
    let admin = app.login("root@example.com", "password123").await;

    let viewer = app.register_and_login("promote-me@example.com", "Hopeful", "password123").await;

    let res = app.request(
        "PUT", &format!("/api/v1/admin/users/{}/role", viewer.user_id),
        Some(&admin), Some(json!({"role": "organizer"})),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["role"], "organizer");

    let res = app.request("GET", "/api/v1/admin/users", Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 2);

    // Non-admins are shut out.
    let fresh_viewer = app.register_and_login("pleb@example.com", "Pleb", "password123").await;
    let res = app.request("GET", "/api/v1/admin/users", Some(&fresh_viewer), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
