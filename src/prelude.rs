//! Minimal prelude for application code.

pub use crate::client::{TextApiClient, TextApiClientBuilder};
pub use crate::config::{Config, Method};
pub use crate::endpoint::Endpoint;
pub use crate::error::{Error, ErrorKind};
pub use crate::params::{Input, Params};
pub use crate::rate_limit::RateLimits;
pub use crate::Result;
