//! GraphQL-over-HTTP transport.
//!
//! Posts `{query, operationName, variables}` to a single endpoint and unwraps
//! the `data` member of the response. Transient failures are retried with
//! exponential backoff for queries only; mutations are sent exactly once.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::error::{ApiError, Result};
use super::transport::Transport;
use super::types::{GraphQlRequest, GraphQlResponse, OperationRequest};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for a query.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// A GraphQL client talking to a remote HTTP endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    /// The HTTP client.
    client: Client,
    /// The GraphQL endpoint URL.
    endpoint: String,
}

impl GraphQlClient {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint);
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ApiError::InvalidUrl(endpoint));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post with retries for transient failures.
    async fn post_with_retry(&self, request: &OperationRequest) -> Result<Value> {
        let mut attempts = 0;
        let mut last_error: Option<ApiError> = None;

        while attempts < MAX_RETRIES {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.post(request).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    if e.is_transient() && attempts < MAX_RETRIES {
                        let delay = Self::calculate_retry_delay(attempts);
                        warn!(
                            "Request failed (attempt {}), retrying in {}ms: {}",
                            attempts, delay, e
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ApiError::ServerError("Max retries exceeded".to_string())))
    }

    /// Post a single request.
    async fn post(&self, request: &OperationRequest) -> Result<Value> {
        let body = GraphQlRequest::from(request);
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);
            return Err(Self::error_from_response(status, &self.endpoint, &error_body));
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if !envelope.errors.is_empty() {
            error!(count = envelope.errors.len(), "GraphQL errors in response");
            return Err(ApiError::GraphQl(envelope.errors));
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }

    /// Map a failed HTTP response, preferring GraphQL error messages in the body.
    fn error_from_response(status: StatusCode, endpoint: &str, body: &str) -> ApiError {
        if let Ok(envelope) = serde_json::from_str::<GraphQlResponse>(body) {
            if !envelope.errors.is_empty() && status.is_client_error() {
                return ApiError::GraphQl(envelope.errors);
            }
        }
        ApiError::from_status(status, endpoint)
    }

    fn calculate_retry_delay(attempt: u32) -> u64 {
        RETRY_DELAY_MS * 2u64.pow(attempt.saturating_sub(1))
    }
}

#[async_trait]
impl Transport for GraphQlClient {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(operation = %request.document.operation_name()))]
    async fn execute(&self, request: &OperationRequest) -> Result<Value> {
        if request.document.is_mutation() {
            self.post(request).await
        } else {
            self.post_with_retry(request).await
        }
    }
}

fn normalize_endpoint(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("Endpoint does not use HTTPS: {}", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Document;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn list_request() -> OperationRequest {
        OperationRequest::without_variables(Document::query("GetThings", "query GetThings { a }"))
    }

    #[test]
    fn test_normalize_endpoint_removes_trailing_slash() {
        assert_eq!(
            normalize_endpoint("https://api.example.com/graphql/"),
            "https://api.example.com/graphql"
        );
    }

    #[test]
    fn test_new_rejects_non_http_endpoint() {
        let err = GraphQlClient::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_retry_delay_exponential() {
        assert_eq!(GraphQlClient::calculate_retry_delay(1), 1000);
        assert_eq!(GraphQlClient::calculate_retry_delay(2), 2000);
        assert_eq!(GraphQlClient::calculate_retry_delay(3), 4000);
    }

    #[tokio::test]
    async fn test_execute_returns_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({"operationName": "GetThings"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"things": [1, 2, 3]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&format!("{}/graphql", server.uri())).unwrap();
        let data = client.execute(&list_request()).await.unwrap();
        assert_eq!(data["things"], json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_execute_surfaces_graphql_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{"message": "Cannot query field \"nope\""}]
            })))
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri()).unwrap();
        let err = client.execute(&list_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::GraphQl(_)));
        assert!(err.to_string().contains("Cannot query field"));
    }

    #[tokio::test]
    async fn test_missing_data_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri()).unwrap();
        let data = client.execute(&list_request()).await.unwrap();
        assert!(data.is_null());
    }

    #[tokio::test]
    async fn test_mutation_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri()).unwrap();
        let request =
            OperationRequest::without_variables(Document::mutation("AddThing", "mutation AddThing { a }"));
        let err = client.execute(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[tokio::test]
    async fn test_client_error_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri()).unwrap();
        let err = client.execute(&list_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
