//! Reqwest-based HTTP client adapter.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::traits::{ApiRequest, ApiResponse, HttpClient, HttpError, Method};

/// Sends API requests with a shared reqwest client.
///
/// # Example
///
/// ```ignore
/// use fibex::adapters::ReqwestHttpClient;
/// use fibex::traits::{ApiRequest, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.send(ApiRequest::get("http://127.0.0.1:5173/api/cars")).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Requests are sent once and wait as long as the server takes.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn classify(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::Connect(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else if err.is_decode() || err.is_body() {
            HttpError::Decode(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header(ACCEPT, "application/json");
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(Self::classify)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(Self::classify)?;

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invalid_url() {
        let client = ReqwestHttpClient::new();
        let result = client.send(ApiRequest::get("not-a-valid-url")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = ReqwestHttpClient::new();
        let result = client
            .send(ApiRequest::get("http://127.0.0.1:59999/api/folders"))
            .await;
        assert!(matches!(
            result,
            Err(HttpError::Connect(_)) | Err(HttpError::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_json_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/cars/1"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"hp": 500})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "hp": 500})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/cars/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new();
        let url = format!("{}/api/cars/1", server.uri());

        let updated = client
            .send(ApiRequest::put_json(&url, &json!({"hp": 500})).unwrap())
            .await
            .unwrap();
        assert_eq!(updated.status, 200);
        assert_eq!(updated.decode::<serde_json::Value>().unwrap()["hp"], 500);
        assert!(updated
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("application/json"));

        let deleted = client.send(ApiRequest::delete(&url)).await.unwrap();
        assert_eq!(deleted.status, 204);
        assert!(deleted.body.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cars"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch cars"})),
            )
            .mount(&server)
            .await;

        let response = ReqwestHttpClient::new()
            .send(ApiRequest::get(format!("{}/api/cars", server.uri())))
            .await
            .unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.error_message().as_deref(), Some("Failed to fetch cars"));
    }

    #[tokio::test]
    async fn test_slow_response_is_awaited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/folders"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(std::time::Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = ReqwestHttpClient::new()
            .send(ApiRequest::get(format!("{}/api/folders", server.uri())))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }
}
