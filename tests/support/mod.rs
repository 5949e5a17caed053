//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use aylien_textapi::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use aylien_textapi::{TextApiClient, TextApiClientBuilder};
use bytes::Bytes;
use mockito::{Mock, Server, ServerGuard};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::{Arc, Mutex};

pub const APP_ID: &str = "test-app-id";
pub const APP_KEY: &str = "test-app-key";
pub const API_PREFIX: &str = "/api/v1";

/// Test fixture that manages a mock HTTP server.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_uri: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_uri = format!("{}{}", server.url(), API_PREFIX);
        Self { server, base_uri }
    }

    /// Builder pointed at the mock server with test credentials.
    pub fn builder(&self) -> TextApiClientBuilder {
        TextApiClientBuilder::new()
            .app_id(APP_ID)
            .app_key(APP_KEY)
            .base_uri(&self.base_uri)
            .user_agent("textapi-tests/1.0")
    }

    pub fn client(&self) -> TextApiClient {
        self.builder().build().expect("client should build")
    }

    /// Successful JSON response carrying rate-limit headers.
    pub async fn mock_json(&mut self, method: &str, path: &str, body: &str, hits: usize) -> Mock {
        self.server
            .mock(method, format!("{API_PREFIX}/{path}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-ratelimit-limit", "1000")
            .with_header("x-ratelimit-remaining", "999")
            .with_header("x-ratelimit-reset", "1700000000")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// Error response with the given status and JSON body.
    pub async fn mock_error(&mut self, path: &str, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", format!("{API_PREFIX}/{path}").as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}

/// In-process transport that records requests and replays canned responses.
pub struct RecordingTransport {
    pub requests: Mutex<Vec<HttpRequest>>,
    reply: Reply,
}

enum Reply {
    Response {
        status: u16,
        headers: Vec<(&'static str, &'static str)>,
        body: &'static str,
    },
    Fail(&'static str),
}

impl RecordingTransport {
    pub fn ok(body: &'static str) -> Arc<Self> {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &'static str) -> Arc<Self> {
        Self::with_headers(status, Vec::new(), body)
    }

    pub fn with_headers(
        status: u16,
        headers: Vec<(&'static str, &'static str)>,
        body: &'static str,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Reply::Response {
                status,
                headers,
                body,
            },
        })
    }

    pub fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Reply::Fail(message),
        })
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Fail(msg) => Err(TransportError::Other(msg.to_string())),
            Reply::Response {
                status,
                headers,
                body,
            } => {
                let body: &'static str = *body;
                let mut map = HeaderMap::new();
                for &(k, v) in headers {
                    map.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
                }
                Ok(HttpResponse {
                    status: *status,
                    headers: map,
                    body: Bytes::from_static(body.as_bytes()),
                })
            }
        }
    }
}

/// Client wired to a [`RecordingTransport`].
pub fn client_with(transport: Arc<RecordingTransport>) -> TextApiClient {
    TextApiClientBuilder::new()
        .app_id(APP_ID)
        .app_key(APP_KEY)
        .base_uri("https://api.test.local/api/v1")
        .transport(transport)
        .build()
        .expect("client should build")
}
