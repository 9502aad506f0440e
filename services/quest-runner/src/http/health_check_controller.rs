use crate::application::APPLICATION_NAME;
use crate::application::context::SharedApplicationState;
use crate::http::model::HealthCheckResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use std::sync::LazyLock;

static HEALTH_CHECK_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> = LazyLock::new(|| {
    opentelemetry::global::meter(APPLICATION_NAME)
        .u64_counter("http_server_health_check_requests")
        .with_description("Number of health check requests")
        .build()
});

pub struct HealthCheckController;

impl HealthCheckController {
    #[tracing::instrument(level = "debug", skip(state))]
    pub async fn get_status_endpoint_handler(
        State(state): State<SharedApplicationState>,
    ) -> impl IntoResponse {
        tracing::debug!("Reporting service status and campaign targets");

        HEALTH_CHECK_COUNTER.add(1, &[]);

        let response = HealthCheckResponse::up(state.read().await.settings().endpoints());

        Json(response)
    }
}
