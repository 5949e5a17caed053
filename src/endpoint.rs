//! Endpoint descriptors.

use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::str::FromStr;

/// Placeholder substituted by the `taxonomy` parameter.
pub const TAXONOMY_PLACEHOLDER: &str = "{taxonomy}";

/// One remote operation of the Text API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Extract,
    Classify,
    ClassifyByTaxonomy,
    Concepts,
    Hashtags,
    Entities,
    Language,
    Sentiment,
    Summarize,
    Related,
    Microformats,
    UnsupervisedClassify,
    Combined,
    ImageTags,
}

impl Endpoint {
    pub const ALL: [Endpoint; 14] = [
        Endpoint::Extract,
        Endpoint::Classify,
        Endpoint::ClassifyByTaxonomy,
        Endpoint::Concepts,
        Endpoint::Hashtags,
        Endpoint::Entities,
        Endpoint::Language,
        Endpoint::Sentiment,
        Endpoint::Summarize,
        Endpoint::Related,
        Endpoint::Microformats,
        Endpoint::UnsupervisedClassify,
        Endpoint::Combined,
        Endpoint::ImageTags,
    ];

    /// Operation name, as used by [`crate::TextApiClient::call_by_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Extract => "extract",
            Endpoint::Classify => "classify",
            Endpoint::ClassifyByTaxonomy => "classify_by_taxonomy",
            Endpoint::Concepts => "concepts",
            Endpoint::Hashtags => "hashtags",
            Endpoint::Entities => "entities",
            Endpoint::Language => "language",
            Endpoint::Sentiment => "sentiment",
            Endpoint::Summarize => "summarize",
            Endpoint::Related => "related",
            Endpoint::Microformats => "microformats",
            Endpoint::UnsupervisedClassify => "unsupervised_classify",
            Endpoint::Combined => "combined",
            Endpoint::ImageTags => "image_tags",
        }
    }

    /// Path relative to the base URI. May contain [`TAXONOMY_PLACEHOLDER`].
    pub fn path_template(&self) -> &'static str {
        match self {
            Endpoint::Extract => "extract",
            Endpoint::Classify => "classify",
            Endpoint::ClassifyByTaxonomy => "classify/{taxonomy}",
            Endpoint::Concepts => "concepts",
            Endpoint::Hashtags => "hashtags",
            Endpoint::Entities => "entities",
            Endpoint::Language => "language",
            Endpoint::Sentiment => "sentiment",
            Endpoint::Summarize => "summarize",
            Endpoint::Related => "related",
            Endpoint::Microformats => "microformats",
            Endpoint::UnsupervisedClassify => "classify/unsupervised",
            Endpoint::Combined => "combined",
            Endpoint::ImageTags => "image-tags",
        }
    }

    pub fn is_templated(&self) -> bool {
        self.path_template().contains(TAXONOMY_PLACEHOLDER)
    }

    /// Fill the path template. `taxonomy` is required for templated endpoints
    /// and ignored otherwise.
    pub fn resolve_path(&self, taxonomy: Option<&str>) -> Result<String> {
        let template = self.path_template();
        if !self.is_templated() {
            return Ok(template.to_string());
        }
        let taxonomy = taxonomy.map(str::trim).unwrap_or_default();
        if taxonomy.is_empty() {
            return Err(Error::invalid_input_with_context(
                format!("{} requires a non-empty taxonomy", self.name()),
                ErrorContext::new()
                    .with_field_path("params.taxonomy")
                    .with_source("endpoint"),
            ));
        }
        if taxonomy
            .chars()
            .any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace())
        {
            return Err(Error::invalid_input_with_context(
                "taxonomy must be a single path segment",
                ErrorContext::new()
                    .with_field_path("params.taxonomy")
                    .with_details(format!("got {:?}", taxonomy))
                    .with_source("endpoint"),
            ));
        }
        Ok(template.replace(TAXONOMY_PLACEHOLDER, taxonomy))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Accepts the operation name, its dashed form, or the fixed path.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().trim_matches('/').to_ascii_lowercase().replace('-', "_");
        Endpoint::ALL
            .iter()
            .copied()
            .find(|ep| {
                ep.name() == wanted
                    || (!ep.is_templated() && ep.path_template().replace('-', "_") == wanted)
            })
            .ok_or_else(|| {
                Error::invalid_input_with_context(
                    format!("unknown endpoint '{}'", s),
                    ErrorContext::new().with_source("endpoint"),
                )
            })
    }
}
