use crate::client::core::TextApiClient;
use crate::config::{Config, Method, Settings};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
///
/// Anything left unset falls back to the process-wide defaults (see
/// [`crate::configure`]) and then to the built-in defaults.
pub struct TextApiClientBuilder {
    overrides: Config,
    transport: Option<Arc<dyn Transport>>,
}

impl TextApiClientBuilder {
    pub fn new() -> Self {
        Self {
            overrides: Config::default(),
            transport: None,
        }
    }

    /// Start from the `TEXTAPI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new().config(Config::from_env()?))
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.overrides.app_id = Some(app_id.into());
        self
    }

    pub fn app_key(mut self, app_key: impl Into<String>) -> Self {
        self.overrides.app_key = Some(app_key.into());
        self
    }

    /// Override the service root address (e.g. to point at a mock server).
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.overrides.base_uri = Some(base_uri.into());
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.overrides.method = Some(method);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.overrides.user_agent = Some(user_agent.into());
        self
    }

    /// Overlay a whole [`Config`]; keys it sets replace earlier overrides.
    pub fn config(mut self, config: Config) -> Self {
        self.overrides = self.overrides.merge(&config);
        self
    }

    /// Use a custom transport instead of the default reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<TextApiClient> {
        let settings = Settings::resolve(&self.overrides);
        settings.validate()?;
        if !settings.has_credentials() {
            tracing::warn!(
                base_uri = settings.base_uri.as_str(),
                "Text API client built without app_id/app_key; calls will likely be rejected"
            );
        }

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new()?),
        };

        Ok(TextApiClient::from_parts(settings, transport))
    }
}

impl Default for TextApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
