use crate::client::builder::TextApiClientBuilder;
use crate::client::signals::SignalsSnapshot;
use crate::config::Settings;
use crate::endpoint::Endpoint;
use crate::normalize::normalize;
use crate::params::Input;
use crate::rate_limit::RateLimits;
use crate::transport::{HttpRequest, Transport};
use crate::{Error, Result};
use arc_swap::ArcSwapOption;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const APP_ID_HEADER: &str = "X-AYLIEN-TextAPI-Application-ID";
pub const APP_KEY_HEADER: &str = "X-AYLIEN-TextAPI-Application-Key";

/// Text sent by [`TextApiClient::rate_limits`] when it has to make a call first.
const RATE_LIMIT_PROBE_TEXT: &str = "Hello";

/// Client for the Text Analysis API.
///
/// Every operation comes in two forms: the strict one (`sentiment`,
/// `extract`, ...) returns every failure as an [`Error`]; the lenient one
/// (`sentiment_lenient`, ...) turns remote and transport failures into
/// `Ok(None)`. Invalid caller input is an error in both.
pub struct TextApiClient {
    settings: Arc<Settings>,
    transport: Arc<dyn Transport>,
    last_rate_limits: ArcSwapOption<RateLimits>,
    calls_made: AtomicU64,
}

impl TextApiClient {
    /// Client with the given credentials and defaults for everything else.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Result<Self> {
        TextApiClientBuilder::new()
            .app_id(app_id)
            .app_key(app_key)
            .build()
    }

    pub fn builder() -> TextApiClientBuilder {
        TextApiClientBuilder::new()
    }

    pub(crate) fn from_parts(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings: Arc::new(settings),
            transport,
            last_rate_limits: ArcSwapOption::empty(),
            calls_made: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Normalize `input` for `endpoint` and attach the client settings,
    /// producing the exact request [`call`](Self::call) would send.
    pub fn prepare(&self, endpoint: Endpoint, input: impl Into<Input>) -> Result<HttpRequest> {
        let normalized = normalize(input, endpoint)?;
        let settings = &self.settings;

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), settings.user_agent.clone()),
        ];
        if let Some(id) = &settings.app_id {
            headers.push((APP_ID_HEADER.to_string(), id.clone()));
        }
        if let Some(key) = &settings.app_key {
            headers.push((APP_KEY_HEADER.to_string(), key.clone()));
        }

        Ok(HttpRequest {
            method: settings.method,
            url: settings.endpoint_url(&normalized.path),
            params: normalized.params.to_pairs(),
            headers,
        })
    }

    /// Strict call: every failure is returned as an error.
    pub async fn call(&self, endpoint: Endpoint, input: impl Into<Input>) -> Result<Value> {
        let request = self.prepare(endpoint, input)?;
        let request_id = Uuid::new_v4().to_string();
        debug!(
            request_id = request_id.as_str(),
            endpoint = endpoint.name(),
            method = request.method.as_str(),
            url = request.url.as_str(),
            "sending Text API request"
        );

        let start = Instant::now();
        self.calls_made.fetch_add(1, Ordering::Relaxed);
        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                info!(
                    request_id = request_id.as_str(),
                    endpoint = endpoint.name(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Text API transport failure"
                );
                return Err(Error::Transport(e));
            }
        };

        let rate_limits = RateLimits::from_headers(&response.headers);
        if let Some(rl) = &rate_limits {
            self.last_rate_limits.store(Some(Arc::new(rl.clone())));
        }

        if !response.is_success() {
            let err = Error::from_status(response.status, &response.text(), rate_limits);
            info!(
                request_id = request_id.as_str(),
                http_status = response.status,
                endpoint = endpoint.name(),
                duration_ms = start.elapsed().as_millis() as u64,
                error = %err,
                "Text API request failed"
            );
            return Err(err);
        }

        let value: Value = serde_json::from_slice(&response.body)?;
        debug!(
            request_id = request_id.as_str(),
            http_status = response.status,
            endpoint = endpoint.name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Text API request succeeded"
        );
        Ok(value)
    }

    /// Lenient call: remote, transport and decode failures become `Ok(None)`.
    /// Invalid input is still an error.
    pub async fn call_lenient(
        &self,
        endpoint: Endpoint,
        input: impl Into<Input>,
    ) -> Result<Option<Value>> {
        match self.call(endpoint, input).await {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_invalid_input() => Err(e),
            Err(e) => {
                warn!(
                    endpoint = endpoint.name(),
                    error = %e,
                    "suppressing Text API failure in lenient call"
                );
                Ok(None)
            }
        }
    }

    /// Strict call addressed by operation name (`"sentiment"`, `"image-tags"`,
    /// `"classify/unsupervised"`, ...).
    pub async fn call_by_name(&self, name: &str, input: impl Into<Input>) -> Result<Value> {
        let endpoint: Endpoint = name.parse()?;
        self.call(endpoint, input).await
    }

    /// Lenient counterpart of [`call_by_name`](Self::call_by_name).
    pub async fn call_by_name_lenient(
        &self,
        name: &str,
        input: impl Into<Input>,
    ) -> Result<Option<Value>> {
        let endpoint: Endpoint = name.parse()?;
        self.call_lenient(endpoint, input).await
    }

    /// Most recently observed rate-limit metadata.
    ///
    /// On a client that has not made any call yet this first issues a
    /// language-detection request so there is something to report. Use
    /// [`last_rate_limits`](Self::last_rate_limits) to avoid the network.
    pub async fn rate_limits(&self) -> Result<Option<RateLimits>> {
        if let Some(rl) = self.last_rate_limits() {
            return Ok(Some(rl));
        }
        if self.calls_made() == 0 {
            debug!("no calls made yet; probing language endpoint for rate limits");
            if let Err(e) = self.call(Endpoint::Language, RATE_LIMIT_PROBE_TEXT).await {
                // A rejected probe (e.g. 429) still reports its quota headers.
                if e.rate_limits().is_none() {
                    return Err(e);
                }
            }
        }
        Ok(self.last_rate_limits())
    }

    /// Rate-limit metadata recorded so far, without any network access.
    pub fn last_rate_limits(&self) -> Option<RateLimits> {
        self.last_rate_limits
            .load()
            .as_ref()
            .map(|rl| rl.as_ref().clone())
    }

    pub fn calls_made(&self) -> u64 {
        self.calls_made.load(Ordering::Relaxed)
    }

    pub fn signals(&self) -> SignalsSnapshot {
        SignalsSnapshot {
            calls_made: self.calls_made(),
            last_rate_limits: self.last_rate_limits(),
        }
    }
}

impl std::fmt::Debug for TextApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextApiClient")
            .field("settings", &self.settings)
            .field("calls_made", &self.calls_made())
            .finish_non_exhaustive()
    }
}
