use crate::campaign::error::FetchError;
use crate::campaign::work_item::WorkItem;

pub struct WorkListFetcher {
    client: reqwest::Client,
    url: String,
}

impl WorkListFetcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Retrieves the work list. Only a `200 OK` answer holding a non-empty
    /// JSON array of work items is accepted.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Vec<WorkItem>, FetchError> {
        tracing::debug!("Fetching the work list");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;

        // A `null` body is accepted by the parser and rejected as empty below
        let work_items = serde_json::from_slice::<Option<Vec<WorkItem>>>(&body)?
            .filter(|work_items| !work_items.is_empty())
            .ok_or(FetchError::Empty)?;

        tracing::info!("Fetched {} work items", work_items.len());

        Ok(work_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::method;
    use wiremock::matchers::path;

    async fn fetch_from(response: ResponseTemplate) -> Result<Vec<WorkItem>, FetchError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = WorkListFetcher::new(
            reqwest::Client::new(),
            format!("{}/data.json", server.uri()),
        );

        fetcher.fetch().await
    }

    #[tokio::test]
    async fn fetch_parses_work_items_in_order() {
        let work_items = fetch_from(ResponseTemplate::new(200).set_body_string(
            r#"[{"api":"T1","number":"95912345678"},{"api":"T2","number":"95987654321"}]"#,
        ))
        .await
        .unwrap();

        assert_eq!(
            work_items,
            vec![
                WorkItem::new("95912345678", "T1"),
                WorkItem::new("95987654321", "T2"),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_rejects_non_ok_status() {
        for status in [201, 404, 500] {
            let result = fetch_from(
                ResponseTemplate::new(status).set_body_string(r#"[{"api":"T1","number":"1"}]"#),
            )
            .await;

            assert!(
                matches!(result, Err(FetchError::UnexpectedStatus(code)) if code.as_u16() == status),
                "status {status} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_body() {
        let result =
            fetch_from(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[tokio::test]
    async fn fetch_rejects_null_and_empty_lists() {
        for body in ["null", "[]"] {
            let result = fetch_from(ResponseTemplate::new(200).set_body_string(body)).await;

            assert!(matches!(result, Err(FetchError::Empty)), "body {body}");
        }
    }

    #[tokio::test]
    async fn fetch_reports_transport_errors() {
        let fetcher = WorkListFetcher::new(reqwest::Client::new(), "http://127.0.0.1:1/data.json");

        assert!(matches!(fetcher.fetch().await, Err(FetchError::Transport(_))));
    }
}
