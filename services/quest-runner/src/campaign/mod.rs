use crate::application::APPLICATION_NAME;
use std::sync::LazyLock;

pub mod claim;
pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod work_item;

static CAMPAIGN_REQUEST_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> =
    LazyLock::new(|| {
        opentelemetry::global::meter(APPLICATION_NAME)
            .u64_counter("campaign_requests")
            .with_description("Number of claim and network test requests sent, by outcome")
            .build()
    });

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Claim,
    NetworkTest,
}

impl RequestKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::NetworkTest => "network_test",
        }
    }
}

/// Collapses the result of an outbound call into its outcome: only an exact
/// `200 OK` counts as a success. Transport errors and every other status are
/// logged and reported as a failure.
pub fn collapse_outcome(
    kind: RequestKind,
    response: Result<reqwest::Response, reqwest::Error>,
) -> bool {
    let succeeded = match response {
        Ok(response) if response.status() == reqwest::StatusCode::OK => true,
        Ok(response) => {
            tracing::warn!(
                kind = kind.as_str(),
                status = response.status().as_u16(),
                "Request rejected by remote endpoint"
            );
            false
        }
        Err(err) => {
            tracing::warn!(kind = kind.as_str(), error = %err, "Request failed");
            false
        }
    };

    CAMPAIGN_REQUEST_COUNTER.add(
        1,
        &[
            opentelemetry::KeyValue::new("kind", kind.as_str()),
            opentelemetry::KeyValue::new("outcome", if succeeded { "success" } else { "failure" }),
        ],
    );

    succeeded
}
