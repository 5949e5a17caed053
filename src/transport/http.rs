use super::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::Method;
use async_trait::async_trait;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Default transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        // Minimal production-friendly defaults (env-overridable).
        let timeout_secs = env::var("TEXTAPI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(
                env::var("TEXTAPI_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(8),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Ok(proxy_url) = env::var("TEXTAPI_PROXY_URL") {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!(proxy = %proxy_url, error = %e, "ignoring invalid TEXTAPI_PROXY_URL"),
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = match request.method {
            Method::Post => self.client.post(&request.url).form(&request.params),
            Method::Get => self.client.get(&request.url).query(&request.params),
        };

        for (k, v) in &request.headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
