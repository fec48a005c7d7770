use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::profiles::delete_account::delete_account;
use super::handlers::profiles::education::add_education;
use super::handlers::profiles::education::remove_education;
use super::handlers::profiles::experience::add_experience;
use super::handlers::profiles::experience::remove_experience;
use super::handlers::profiles::get_own_profile::get_own_profile;
use super::handlers::profiles::get_profile_by_user::get_profile_by_user;
use super::handlers::profiles::list_profiles::list_profiles;
use super::handlers::profiles::upsert_profile::upsert_profile;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    profile_service: Arc<dyn ProfileServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        profile_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/", get(|| async { "API running" }))
        .route("/api/users", post(register))
        .route("/api/auth", post(login))
        .route("/api/profile", get(list_profiles))
        .route("/api/profile/user/:user_id", get(get_profile_by_user));

    let protected_routes = Router::new()
        .route("/api/auth", get(current_user))
        .route("/api/profile/me", get(get_own_profile))
        .route("/api/profile", post(upsert_profile).delete(delete_account))
        .route("/api/profile/experience", put(add_experience))
        .route("/api/profile/experience/:exp_id", delete(remove_experience))
        .route("/api/profile/education", put(add_education))
        .route("/api/profile/education/:edu_id", delete(remove_education))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.authenticator),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
