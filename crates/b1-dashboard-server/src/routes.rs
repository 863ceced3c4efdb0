use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::config::Settings;
use crate::handlers;
use crate::services::ServiceLayerClient;
use crate::session::SessionStore;

pub fn build_router(
    settings: Arc<Settings>,
    store: Arc<SessionStore>,
    gateway: Arc<ServiceLayerClient>,
) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/session", get(handlers::auth::session_check))
        .route(
            "/api/business-partners",
            get(handlers::resources::business_partners),
        )
        .route("/api/items", get(handlers::resources::items))
        .route("/api/sales-orders", get(handlers::resources::sales_orders))
        .route("/api/locations", get(handlers::resources::locations))
        .route("/api/branches", get(handlers::resources::branches))
        .route("/api/warehouses", get(handlers::resources::warehouses))
        .route("/api/dashboard-stats", get(handlers::dashboard::dashboard_stats))
        .route("/api/config", get(handlers::meta::config_info))
        .route("/api/databases", get(handlers::meta::databases))
        .layer(Extension(settings))
        .layer(Extension(store))
        .layer(Extension(gateway))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
