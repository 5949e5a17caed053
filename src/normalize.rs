//! Request normalization: folds the positional value into the parameter
//! mapping and resolves the endpoint path.

use crate::endpoint::Endpoint;
use crate::params::{Input, ParamValue, Params};
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$")
        .expect("URL shape pattern is valid")
});

/// Whether `value` looks like an `http(s)` URL the service can fetch.
pub fn is_url(value: &str) -> bool {
    URL_SHAPE.is_match(value)
}

/// Output of [`normalize`]: ready to be sent, minus settings.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    pub endpoint: Endpoint,
    /// Path relative to the base URI, template already filled.
    pub path: String,
    pub params: Params,
}

/// Fold a loosely-typed input into the request shape for `endpoint`.
///
/// The positional value is only consulted when `url` is unset and `text`
/// and `title` are not both set. It never overwrites a key the caller
/// supplied.
pub fn normalize(input: impl Into<Input>, endpoint: Endpoint) -> Result<NormalizedRequest> {
    let (value, mut params) = input.into().into_parts();

    if let Some(value) = value {
        if !params.contains("url") && !(params.contains("text") && params.contains("title")) {
            let value = value.trim();
            if !value.is_empty() {
                params.insert_if_absent(positional_key(value, endpoint), value);
            }
        }
    }

    let path = if endpoint.is_templated() {
        let taxonomy = match params.remove("taxonomy") {
            None => None,
            Some(ParamValue::Str(s)) => Some(s),
            Some(other) => {
                return Err(Error::invalid_input_with_context(
                    "taxonomy must be a string",
                    ErrorContext::new()
                        .with_field_path("params.taxonomy")
                        .with_details(format!("got {:?}", other))
                        .with_source("normalizer"),
                ))
            }
        };
        endpoint.resolve_path(taxonomy.as_deref())?
    } else {
        endpoint.resolve_path(None)?
    };

    Ok(NormalizedRequest {
        endpoint,
        path,
        params,
    })
}

fn positional_key(value: &str, endpoint: Endpoint) -> &'static str {
    if is_url(value) {
        "url"
    } else if endpoint == Endpoint::Related {
        "phrase"
    } else {
        "text"
    }
}
