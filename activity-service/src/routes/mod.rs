use axum::{extract::Request, middleware, routing::post, Router};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    activity_handlers::{
        activity_request_action, attend_activity, cancel_attending_activity, cancel_request,
        get_activity_requests,
    },
    AppState,
};
use gather_shared::auth::auth_middleware;
use gather_shared::store::{
    dynamo::{DynamoActivityStore, DynamoUserStore},
    ActivityStore, UserStore,
};

/// Creates a router backed by the default DynamoDB stores.
pub async fn create_router() -> Router {
    info!("Creating router with DynamoDB stores");

    let activity_store = Arc::new(DynamoActivityStore::new().await);
    let user_store = Arc::new(DynamoUserStore::new().await);

    // Check if we should remove the base path prefix
    let remove_base_path = std::env::var("REMOVE_BASE_PATH")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let prefix = if remove_base_path { "" } else { "/Prod" };
    info!("Using API route prefix: {}", prefix);

    create_router_with_store(activity_store, user_store, prefix)
}

/// Creates a router with the given store implementations.
pub fn create_router_with_store<A, U>(
    activities: Arc<A>,
    users: Arc<U>,
    prefix: &str,
) -> Router
where
    A: ActivityStore + 'static,
    U: UserStore + 'static,
{
    info!("Setting up API routes with prefix: '{}'", prefix);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let state = AppState { activities, users };

    // All attendance routes are body-addressed: the activity id travels in
    // the JSON payload, not the path.
    let activity_routes = Router::new()
        .route("/activities/attend", post(attend_activity))
        .route("/activities/attend/cancel", post(cancel_attending_activity))
        .route("/activities/requests", post(get_activity_requests))
        .route("/activities/requests/cancel", post(cancel_request))
        .route("/activities/requests/action", post(activity_request_action))
        .layer(middleware::from_fn(auth_middleware))
        .with_state(state);

    let router = if prefix.is_empty() {
        // For tests or when no prefix is needed, don't nest the routes
        activity_routes
            .layer(cors)
            .layer(middleware::from_fn(logging_middleware))
    } else {
        Router::new()
            .nest(prefix, activity_routes)
            .layer(cors)
            .layer(middleware::from_fn(logging_middleware))
    };

    router.fallback(|req: Request| async move {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    })
}
