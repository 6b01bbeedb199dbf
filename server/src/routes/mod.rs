use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::{create_cors_layer, SecurityHeaders, X_REQUEST_ID};
use crate::handlers::events::{
    add_participant, create_event, delete_event, get_event, list_events, update_event,
};
use crate::handlers::health_check;
use crate::handlers::participants::{
    create_participant, delete_participant, get_participant, list_event_participants,
    update_participant,
};
use crate::state::AppState;

/// Generates a UUID v4 for requests that arrive without an `x-request-id`.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/:id/participants", post(add_participant))
        .route("/participants", post(create_participant))
        .route("/participants/event/:event_id", get(list_event_participants))
        .route(
            "/participants/:id",
            get(get_participant)
                .put(update_participant)
                .delete(delete_participant),
        )
}

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state);

    SecurityHeaders::from_env()
        .apply(router)
        .layer(create_cors_layer())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(&X_REQUEST_ID)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone())),
        )
}
