use crate::application::APPLICATION_NAME;
use crate::application::context::SharedApplicationState;
use crate::campaign::coordinator::FanOutCoordinator;
use crate::http::model::StartResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use std::sync::LazyLock;

static START_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> = LazyLock::new(|| {
    opentelemetry::global::meter(APPLICATION_NAME)
        .u64_counter("http_server_start_requests")
        .with_description("Number of campaign start requests")
        .build()
});

pub struct StartController;

impl StartController {
    #[tracing::instrument(skip(state))]
    pub async fn start_endpoint_handler(
        State(state): State<SharedApplicationState>,
    ) -> impl IntoResponse {
        tracing::info!("Starting a campaign run");

        START_COUNTER.add(1, &[]);

        let endpoints = state.read().await.settings().endpoints().clone();

        // The connection pool lives for this run only
        let coordinator = FanOutCoordinator::new(reqwest::Client::new(), &endpoints);

        let response = match coordinator.run().await {
            Ok(result) => StartResponse::from(result),
            Err(err) => {
                // The cause stays in the logs, callers only get the generic message
                tracing::debug!("Answering with a fetch error: {err}");
                StartResponse::fetch_error()
            }
        };

        Json(response)
    }
}
