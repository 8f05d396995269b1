use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, artist, auth, booking, booking_review, event, health, me};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Current user
        .route("/api/v1/me", get(me::get_profile))
        .route("/api/v1/me/settings", get(me::get_settings).put(me::put_settings))
        .route("/api/v1/me/bookings", get(me::list_my_bookings))
        .route("/api/v1/me/bookings/{booking_id}/cancel", post(me::cancel_my_booking))

        // Admin
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/{user_id}/role", put(admin::update_role))

        // Artists
        .route("/api/v1/artists", get(artist::list_artists).post(artist::create_artist))
        .route("/api/v1/artists/{artist_id}", get(artist::get_artist).put(artist::update_artist).delete(artist::delete_artist))

        // Events
        .route("/api/v1/events", get(event::list_events).post(event::create_event))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Booking Flow
        .route("/api/v1/events/{event_id}/quote", get(booking::get_quote))
        .route("/api/v1/events/{event_id}/book", post(booking::create_booking))

        // Organizer Booking Review
        .route("/api/v1/events/{event_id}/bookings", get(booking_review::list_event_bookings))
        .route("/api/v1/bookings/{booking_id}/status", put(booking_review::update_booking_status))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
