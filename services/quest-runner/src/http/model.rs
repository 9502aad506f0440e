use crate::application::settings::Endpoints;
use crate::campaign::coordinator::BatchResult;
use crate::campaign::error::FetchError;
use crate::campaign::work_item::Operator;

// Health check models

#[derive(serde::Serialize)]
struct EndpointsResponse {
    work_list: String,
    claim: String,
    network_test: String,
}

/// Liveness answer, along with what the next campaign run would target.
#[derive(serde::Serialize)]
pub struct HealthCheckResponse {
    status: &'static str,
    version: &'static str,
    operators: [Operator; 4],
    endpoints: EndpointsResponse,
}

impl HealthCheckResponse {
    pub fn up(endpoints: &Endpoints) -> Self {
        Self {
            status: "UP",
            version: env!("CARGO_PKG_VERSION"),
            operators: Operator::ALL,
            endpoints: EndpointsResponse {
                work_list: endpoints.work_list_url().to_string(),
                claim: endpoints.claim_url().to_string(),
                network_test: endpoints.network_test_url().to_string(),
            },
        }
    }
}

// Campaign models

#[derive(Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StartResponse {
    Success { success: usize, fail: usize },
    Error { message: &'static str },
}

impl StartResponse {
    pub const fn fetch_error() -> Self {
        Self::Error {
            message: FetchError::PUBLIC_MESSAGE,
        }
    }
}

impl From<BatchResult> for StartResponse {
    fn from(result: BatchResult) -> Self {
        Self::Success {
            success: result.success_count(),
            fail: result.failure_count(),
        }
    }
}
