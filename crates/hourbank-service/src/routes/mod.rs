use crate::handlers::{
    auth_handler, directory_handler, program_handler, transaction_handler, user_handler, AppState,
};
use crate::middleware::auth::require_auth;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Install the global Prometheus recorder and return its render handle.
///
/// Call once at startup, before any metric is recorded.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    // Everything behind the bearer-token middleware.
    let protected = Router::new()
        .route("/user", get(user_handler::handle_identity))
        .route(
            "/programs",
            get(program_handler::handle_list_programs)
                .post(program_handler::handle_create_program),
        )
        .route(
            "/transactions",
            get(transaction_handler::handle_list_transactions)
                .post(transaction_handler::handle_create_transaction),
        )
        .route("/students", get(directory_handler::handle_list_students))
        .route("/students/:roll", get(directory_handler::handle_get_student))
        .route("/faculty", get(directory_handler::handle_list_faculty))
        .route("/faculty/:fid", get(directory_handler::handle_get_faculty))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/login", post(auth_handler::handle_login))
        .route("/register", post(auth_handler::handle_register))
        .merge(protected)
        .route("/health", get(health_check))
        .route(
            "/metrics",
            get(move || async move { metrics_handle.render() }),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
