//! ONVEST HTTP server: shared state, routing, and the REST surface.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use onvest_auth::{AuthConfig, AuthService};
use onvest_db::repository::{
    SurrealApplicationRepository, SurrealEmployeeRepository, SurrealTaskRepository,
    SurrealUserRepository,
};
use onvest_workflow::{DocumentStore, OnboardingEngine};
use surrealdb::{Connection, Surreal};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

/// Request body ceiling. Two scanned KYC documents fit comfortably.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// State shared by every handler.
///
/// Generic over the SurrealDB connection so tests can run the full
/// router against the embedded in-memory engine.
pub struct AppState<C: Connection> {
    pub auth: AuthService<SurrealUserRepository<C>>,
    pub engine: OnboardingEngine<
        SurrealApplicationRepository<C>,
        SurrealTaskRepository<C>,
        SurrealEmployeeRepository<C>,
    >,
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, auth_config: AuthConfig, documents: DocumentStore) -> Self {
        Self {
            auth: AuthService::new(SurrealUserRepository::new(db.clone()), auth_config),
            engine: OnboardingEngine::new(
                SurrealApplicationRepository::new(db.clone()),
                SurrealTaskRepository::new(db.clone()),
                SurrealEmployeeRepository::new(db),
                documents,
            ),
        }
    }
}

/// Build the API router over `state`.
pub fn router<C: Connection>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/api/signup", post(routes::auth::signup::<C>))
        .route("/api/login", post(routes::auth::login::<C>))
        .route("/api/dashboard", get(routes::auth::dashboard))
        .route("/api/onboarding", post(routes::onboarding::submit::<C>))
        .route(
            "/api/user/onboarding-status/{user_id}",
            get(routes::onboarding::status::<C>),
        )
        .route(
            "/api/admin/onboarding/pending",
            get(routes::admin::pending::<C>),
        )
        .route(
            "/api/admin/onboarding/applications",
            get(routes::admin::applications::<C>),
        )
        .route(
            "/api/admin/onboarding/application/{id}",
            get(routes::admin::application_detail::<C>),
        )
        .route(
            "/api/admin/onboarding/application/{id}/assign",
            post(routes::admin::assign::<C>),
        )
        .route(
            "/api/admin/onboarding/application/{id}/status",
            post(routes::admin::update_status::<C>),
        )
        .route("/api/admin/employees", get(routes::admin::employees::<C>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
