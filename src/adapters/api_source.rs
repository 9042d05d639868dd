//! Catalog source backed by the HTTP API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::models::{Car, Folder, FolderInput, NewCar};
use crate::traits::{ApiRequest, ApiResponse, CatalogSource, HttpClient, SourceError};

/// Talks to a running catalog server through an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ApiSource<C: HttpClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> ApiSource<C> {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:5173`.
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, SourceError> {
        let response = self.client.send(request).await?;
        Self::decode(response)
    }

    /// Success bodies decode into `T`; error statuses keep the server's message.
    fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, SourceError> {
        if !response.is_success() {
            let message = response.error_message().unwrap_or_else(|| response.text());
            return Err(SourceError::Status {
                status: response.status,
                message,
            });
        }
        response
            .decode()
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl<C: HttpClient> CatalogSource for ApiSource<C> {
    async fn list_folders(&self) -> Result<Vec<Folder>, SourceError> {
        self.call(ApiRequest::get(self.url("/api/folders"))).await
    }

    async fn list_cars(&self) -> Result<Vec<Car>, SourceError> {
        self.call(ApiRequest::get(self.url("/api/cars"))).await
    }

    async fn create_folder(&self, input: FolderInput) -> Result<Folder, SourceError> {
        let request = ApiRequest::post_json(self.url("/api/folders"), &input)?;
        self.call(request).await
    }

    async fn create_car(&self, car: NewCar) -> Result<Car, SourceError> {
        let request = ApiRequest::post_json(self.url("/api/cars"), &car)?;
        self.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::traits::{HttpError, Method};
    use serde_json::json;

    const BASE: &str = "http://catalog.test";

    #[tokio::test]
    async fn test_list_cars_decodes_body() {
        let client = MockHttpClient::new();
        client.on(
            Method::Get,
            "http://catalog.test/api/cars",
            ApiResponse::json(
                200,
                &json!([{"id": 1, "name": "Tesla Model S", "year": 2023, "engine": "Electric", "hp": 1020, "features": []}]),
            ),
        );

        let source = ApiSource::new(client, format!("{}/", BASE));
        let cars = source.list_cars().await.unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].hp, 1020);
    }

    #[tokio::test]
    async fn test_error_status_carries_message() {
        let client = MockHttpClient::new();
        client.on(
            Method::Get,
            "http://catalog.test/api/folders",
            ApiResponse::json(500, &json!({"error": "Failed to fetch folders"})),
        );
        client.on(
            Method::Get,
            "http://catalog.test/api/cars",
            ApiResponse::new(502, "Bad Gateway"),
        );

        let source = ApiSource::new(client, BASE);
        match source.list_folders().await {
            Err(SourceError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch folders");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        match source.list_cars().await {
            Err(SourceError::Status { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_folder_posts_json() {
        let client = MockHttpClient::new();
        client.on(
            Method::Post,
            "http://catalog.test/api/folders",
            ApiResponse::json(
                201,
                &json!({"id": 4, "name": "Folder 1", "url": "https://example.com/folder-1",
                        "views": 0, "isPrivate": false, "createdAt": "2024-05-01T10:00:00Z"}),
            ),
        );

        let source = ApiSource::new(client.clone(), BASE);
        let folder = source
            .create_folder(FolderInput {
                name: Some("Folder 1".to_string()),
                url: Some("https://example.com/folder-1".to_string()),
                is_private: None,
            })
            .await
            .unwrap();
        assert_eq!(folder.id, 4);

        let posted = client.sent_with(Method::Post);
        assert_eq!(posted.len(), 1);
        assert_eq!(
            posted[0].json_body(),
            Some(json!({"name": "Folder 1", "url": "https://example.com/folder-1"}))
        );
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = MockHttpClient::new();
        client.fail(BASE, HttpError::Connect("refused".to_string()));
        let source = ApiSource::new(client, BASE);
        assert!(matches!(
            source.list_cars().await,
            Err(SourceError::Http(HttpError::Connect(_)))
        ));
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let client = MockHttpClient::new();
        client.on(Method::Get, BASE, ApiResponse::new(200, "<html>"));
        let source = ApiSource::new(client, BASE);
        assert!(matches!(
            source.list_folders().await,
            Err(SourceError::Decode(_))
        ));
    }
}
