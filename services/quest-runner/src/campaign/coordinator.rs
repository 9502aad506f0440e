use crate::application::APPLICATION_NAME;
use crate::application::settings::Endpoints;
use crate::campaign::claim::ClaimRequester;
use crate::campaign::error::FetchError;
use crate::campaign::fetcher::WorkListFetcher;
use crate::campaign::network_test::NetworkTestRequester;
use crate::campaign::work_item::Operator;
use futures::future::join;
use futures::future::join_all;
use std::sync::LazyLock;

static RUN_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> = LazyLock::new(|| {
    opentelemetry::global::meter(APPLICATION_NAME)
        .u64_counter("campaign_runs")
        .with_description("Number of campaign runs started")
        .build()
});

static FETCH_ERROR_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> =
    LazyLock::new(|| {
        opentelemetry::global::meter(APPLICATION_NAME)
            .u64_counter("campaign_fetch_errors")
            .with_description("Number of campaign runs aborted because the work list was unavailable")
            .build()
    });

/// Aggregate of a campaign run, with no detail about which request failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    success_count: usize,
    failure_count: usize,
}

impl BatchResult {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a bool>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut result, &succeeded| {
                if succeeded {
                    result.success_count += 1;
                } else {
                    result.failure_count += 1;
                }
                result
            })
    }

    pub const fn success_count(&self) -> usize {
        self.success_count
    }

    pub const fn failure_count(&self) -> usize {
        self.failure_count
    }
}

/// Runs one campaign: fetches the work list, then sends every claim and every
/// network test at once over the same HTTP client, and counts the outcomes.
pub struct FanOutCoordinator {
    fetcher: WorkListFetcher,
    claim_requester: ClaimRequester,
    network_test_requester: NetworkTestRequester,
}

impl FanOutCoordinator {
    pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
        Self {
            fetcher: WorkListFetcher::new(client.clone(), endpoints.work_list_url()),
            claim_requester: ClaimRequester::new(client.clone(), endpoints.claim_url()),
            network_test_requester: NetworkTestRequester::new(client, endpoints.network_test_url()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<BatchResult, FetchError> {
        RUN_COUNTER.add(1, &[]);

        let work_items = self.fetcher.fetch().await.inspect_err(|err| {
            tracing::error!("Aborting the campaign: {err}");

            FETCH_ERROR_COUNTER.add(1, &[]);
        })?;

        tracing::info!(
            "Dispatching {} claims and {} network tests",
            work_items.len(),
            work_items.len() * Operator::ALL.len()
        );

        let claims = work_items.iter().map(|work_item| {
            self.claim_requester
                .claim(work_item.credential(), work_item.identifier())
        });

        // A network test is sent whatever the claim outcome of its work item
        let network_tests = work_items.iter().flat_map(|work_item| {
            Operator::ALL.into_iter().map(move |operator| {
                self.network_test_requester.submit_test(
                    work_item.identifier(),
                    work_item.credential(),
                    operator,
                )
            })
        });

        let (claim_outcomes, network_test_outcomes) =
            join(join_all(claims), join_all(network_tests)).await;

        let result =
            BatchResult::from_outcomes(claim_outcomes.iter().chain(&network_test_outcomes));

        tracing::info!(
            "Campaign completed: {} succeeded, {} failed",
            result.success_count(),
            result.failure_count()
        );

        Ok(result)
    }
}
