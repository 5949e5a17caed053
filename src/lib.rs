//! # aylien-textapi
//!
//! Async client for the AYLIEN Text Analysis API: article extraction,
//! classification, concepts, hashtags, entities, language detection,
//! sentiment, summarization, related phrases, microformats, unsupervised
//! classification, combined calls and image tagging.
//!
//! ## Overview
//!
//! Every operation accepts a loosely-typed [`Input`]: a string that may be a
//! URL or a piece of text, a [`Params`] mapping, or both. The client decides
//! which request parameter the string belongs to (`url`, `text`, or `phrase`
//! for related-phrase lookups), fills the endpoint path, attaches credentials
//! and sends the request. Results are the decoded JSON bodies, passed through
//! unmodified.
//!
//! Each operation has a strict form returning [`Result<Value>`] and a lenient
//! form (`*_lenient`) that turns remote and transport failures into
//! `Ok(None)`. Invalid caller input (for example a taxonomy classification
//! without a `taxonomy`) fails in both, before any request is sent.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aylien_textapi::{Params, TextApiClient};
//!
//! #[tokio::main]
//! async fn main() -> aylien_textapi::Result<()> {
//!     let client = TextApiClient::new("your-app-id", "your-app-key")?;
//!
//!     let sentiment = client.sentiment("John is a very good football player!").await?;
//!     println!("{}", sentiment["polarity"]);
//!
//!     let article = client
//!         .extract(("http://example.com/article", Params::new().with("best_image", true)))
//!         .await?;
//!     println!("{}", article["title"]);
//!
//!     let quota = client.rate_limits().await?;
//!     println!("{:?}", quota);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and per-operation methods |
//! | [`config`] | Settings resolution and process-wide defaults |
//! | [`normalize`](mod@normalize) | Positional value classification and path templating |
//! | [`endpoint`] | Endpoint descriptors |
//! | [`params`] | Request parameters and call input |
//! | [`transport`] | Transport trait and the reqwest implementation |
//! | [`rate_limit`] | `X-RateLimit-*` metadata |

pub mod client;
pub mod config;
pub mod endpoint;
pub mod normalize;
pub mod params;
pub mod prelude;
pub mod rate_limit;
pub mod transport;

// Re-export main types for convenience
pub use client::{SignalsSnapshot, TextApiClient, TextApiClientBuilder};
pub use config::{configure, defaults, reset_defaults, Config, Method, Settings};
pub use endpoint::Endpoint;
pub use normalize::{is_url, normalize, NormalizedRequest};
pub use params::{Input, ParamValue, Params};
pub use rate_limit::RateLimits;
pub use serde_json::Value;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
