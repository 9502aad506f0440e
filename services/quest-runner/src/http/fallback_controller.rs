use crate::application::APPLICATION_NAME;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use std::sync::LazyLock;

static FALLBACK_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> = LazyLock::new(|| {
    opentelemetry::global::meter(APPLICATION_NAME)
        .u64_counter("http_server_fallback_requests")
        .with_description("Number of requests to routes the service does not expose")
        .build()
});

pub struct FallbackController;

impl FallbackController {
    const KNOWN_ROUTES: &str = "GET /start, GET /health";

    #[allow(clippy::unused_async)]
    #[tracing::instrument(skip(method, uri), fields(method = %method, path = uri.path()))]
    pub async fn fallback_endpoint_handler(method: Method, uri: Uri) -> impl IntoResponse {
        tracing::warn!("No campaign route for {method} {}", uri.path());

        FALLBACK_COUNTER.add(
            1,
            &[
                opentelemetry::KeyValue::new("method", method.to_string()),
                opentelemetry::KeyValue::new("path", uri.path().to_string()),
            ],
        );

        (
            StatusCode::NOT_FOUND,
            format!("Unexpected route, expected one of: {}", Self::KNOWN_ROUTES),
        )
    }
}
