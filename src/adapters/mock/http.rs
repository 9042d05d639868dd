//! Scripted HTTP client.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{ApiRequest, ApiResponse, HttpClient, HttpError, Method};

/// What a matched route produces.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Reply(ApiResponse),
    Fail(HttpError),
}

#[derive(Debug, Clone)]
struct Route {
    method: Option<Method>,
    prefix: String,
    response: MockResponse,
}

impl Route {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.method.map_or(true, |m| m == request.method) && request.url.starts_with(&self.prefix)
    }

    /// Longer prefixes win; a route pinned to a method beats a wildcard.
    fn rank(&self) -> (usize, bool) {
        (self.prefix.len(), self.method.is_some())
    }
}

/// An [`HttpClient`] that answers from a route table and logs every request.
///
/// Unmatched requests fail with [`HttpError::Other`]. Clones share routes
/// and the request log.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.on(Method::Get, "http://catalog/api/cars", ApiResponse::json(200, &json!([])));
/// let source = ApiSource::new(client.clone(), "http://catalog");
/// source.list_cars().await?;
/// assert_eq!(client.sent().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<Vec<Route>>>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `method` requests whose URL starts with `prefix`.
    pub fn on(&self, method: Method, prefix: &str, response: ApiResponse) {
        self.route(Some(method), prefix, MockResponse::Reply(response));
    }

    /// Fail every request whose URL starts with `prefix`.
    pub fn fail(&self, prefix: &str, error: HttpError) {
        self.route(None, prefix, MockResponse::Fail(error));
    }

    pub fn route(&self, method: Option<Method>, prefix: &str, response: MockResponse) {
        self.routes.lock().unwrap().push(Route {
            method,
            prefix: prefix.to_string(),
            response,
        });
    }

    /// Every request sent so far, oldest first.
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_with(&self, method: Method) -> Vec<ApiRequest> {
        self.sent()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    fn lookup(&self, request: &ApiRequest) -> Option<MockResponse> {
        let routes = self.routes.lock().unwrap();
        routes
            .iter()
            .filter(|route| route.matches(request))
            .max_by_key(|route| route.rank())
            .map(|route| route.response.clone())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        self.sent.lock().unwrap().push(request.clone());
        match self.lookup(&request) {
            Some(MockResponse::Reply(response)) => Ok(response),
            Some(MockResponse::Fail(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "no mock route for {} {}",
                request.method, request.url
            ))),
        }
    }
}
