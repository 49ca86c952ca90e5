use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::realtime::EventHub;
use crate::state::SharedState;

pub mod alerts;
pub mod auth;
pub mod dashboards;
mod error;
pub mod events;
mod extract;
pub mod machines;
mod observability;
pub mod production;
pub mod products;
pub mod reports;
pub mod statistics;
mod system;
mod types;
pub mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn hub(&self) -> &EventHub {
        &self.shared.hub
    }

    #[must_use]
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, session_ttl_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_ttl_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session_ttl_minutes,
        )));

    let api_router = create_api_router()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
}

fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboards", get(dashboards::list_dashboards))
        .route("/dashboards", post(dashboards::create_dashboard))
        .route(
            "/dashboards/{id}",
            get(dashboards::list_dashboards_for_user)
                .put(dashboards::update_dashboard)
                .delete(dashboards::delete_dashboard),
        )
        .route("/alertes", get(alerts::list_alerts))
        .route("/alertes", post(alerts::create_alert))
        .route(
            "/alertes/{id}",
            get(alerts::list_alerts_for_user)
                .put(alerts::update_alert)
                .delete(alerts::delete_alert),
        )
        .route("/rapports", get(reports::list_reports))
        .route("/rapports", post(reports::create_report))
        .route(
            "/rapports/{id}",
            get(reports::list_reports_for_user)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        .route(
            "/historique-production",
            get(production::list_histories).post(production::create_history),
        )
        .route(
            "/historique-production/{id}",
            get(production::list_histories_for_user)
                .put(production::update_history)
                .delete(production::delete_history),
        )
        .route(
            "/taches-production",
            get(production::list_tasks).post(production::create_task),
        )
        .route(
            "/taches-production/{id}",
            get(production::list_tasks_for_dashboard)
                .put(production::update_task)
                .delete(production::delete_task),
        )
        .route("/produit/{id}", get(products::lookup_product))
        .route(
            "/produits",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/produits/{id}",
            axum::routing::put(products::update_product).delete(products::delete_product),
        )
        .route(
            "/machines",
            get(machines::list_machine_performance).post(machines::append_machine_performance),
        )
        .route(
            "/statistiques-production",
            get(statistics::list_statistics).post(statistics::create_statistics),
        )
        .route(
            "/statistiques-production/{id}",
            axum::routing::put(statistics::update_statistics).delete(statistics::delete_statistics),
        )
        .route(
            "/tendances-anomalies",
            get(statistics::list_trends).post(statistics::create_trend),
        )
        .route(
            "/tendances-anomalies/{id}",
            axum::routing::put(statistics::update_trend).delete(statistics::delete_trend),
        )
        .route(
            "/utilisateurs",
            get(users::list_users).post(users::create_user),
        )
        .route("/utilisateurs/{id}", axum::routing::delete(users::delete_user))
        .route("/roles", get(users::list_roles).post(users::create_role))
        .route("/events", get(events::events_handler))
        .route("/systeme/etat", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
}
