use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::UserStore;
use shared::jwt::TokenService;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_user_auth, security_headers_middleware, trace_id,
};
use crate::routes::{health, users};
use crate::services::UserService;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: UserService,
}

pub fn create_app(config: Config, store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Router {
    let state = AppState {
        tokens: tokens.clone(),
        users: UserService::new(store, tokens),
    };

    // Token check runs before the handler, so bad tokens are reported
    // before the body is decoded
    let protected_routes = Router::new()
        .route(
            "/v1/user",
            get(users::get_profile).put(users::update_profile),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    let public_routes = Router::new()
        .route("/v1/user", post(users::register))
        .route("/v1/user/login", post(users::login))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .with_state(state)
}
