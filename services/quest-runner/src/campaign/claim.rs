use crate::campaign::RequestKind;
use crate::campaign::collapse_outcome;

#[derive(serde::Serialize)]
struct ClaimRequest<'a> {
    msisdn: &'a str,
}

/// Claims the daily reward of a subscriber.
pub struct ClaimRequester {
    client: reqwest::Client,
    url: String,
}

impl ClaimRequester {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[tracing::instrument(skip(self, credential))]
    pub async fn claim(&self, credential: &str, identifier: &str) -> bool {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential)
            .json(&ClaimRequest { msisdn: identifier })
            .send()
            .await;

        collapse_outcome(RequestKind::Claim, response)
    }
}
