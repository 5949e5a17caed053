//! One strict and one lenient method per operation, all delegating to the
//! generic dispatch in `core.rs`.

use crate::client::core::TextApiClient;
use crate::endpoint::Endpoint;
use crate::params::Input;
use crate::Result;
use serde_json::Value;

macro_rules! endpoint_methods {
    ($( $(#[$doc:meta])* $strict:ident, $lenient:ident => $endpoint:ident; )*) => {
        impl TextApiClient {
            $(
                $(#[$doc])*
                pub async fn $strict(&self, input: impl Into<Input>) -> Result<Value> {
                    self.call(Endpoint::$endpoint, input).await
                }

                #[doc = concat!(
                    "Lenient form of [`", stringify!($strict), "`](Self::", stringify!($strict),
                    "): remote and transport failures yield `Ok(None)`."
                )]
                pub async fn $lenient(&self, input: impl Into<Input>) -> Result<Option<Value>> {
                    self.call_lenient(Endpoint::$endpoint, input).await
                }
            )*
        }
    };
}

endpoint_methods! {
    /// Extract the main body of an article (plus title, author, images) from
    /// a URL, dropping surrounding clutter. Options: `best_image`.
    extract, extract_lenient => Extract;

    /// Classify text or a URL against the IPTC subject codes. Options: `language`.
    classify, classify_lenient => Classify;

    /// Classify against a named taxonomy. The `taxonomy` parameter is
    /// required (e.g. `iab-qag`, `iptc-subjectcode`).
    classify_by_taxonomy, classify_by_taxonomy_lenient => ClassifyByTaxonomy;

    /// Named entities disambiguated and linked to DBPedia resources.
    concepts, concepts_lenient => Concepts;

    /// Hashtag suggestions for a document.
    hashtags, hashtags_lenient => Hashtags;

    /// People, organizations, locations and values (emails, amounts, ...).
    entities, entities_lenient => Entities;

    /// Main language of a document as an ISO 639-1 code.
    language, language_lenient => Language;

    /// Polarity and subjectivity. Options: `mode` (`tweet` or `document`).
    sentiment, sentiment_lenient => Sentiment;

    /// Key sentences of an article. Options: `title`, `mode`,
    /// `sentences_number`, `sentences_percentage`.
    summarize, summarize_lenient => Summarize;

    /// Phrases related to a unigram or bigram. A plain positional value is
    /// sent as `phrase`. Options: `count`.
    related, related_lenient => Related;

    /// hCards found on a web page.
    microformats, microformats_lenient => Microformats;

    /// Pick the best matches among caller-supplied labels (`class`, a list).
    unsupervised_classify, unsupervised_classify_lenient => UnsupervisedClassify;

    /// Run several analyses in one request (`endpoint`, a list of operation names).
    combined, combined_lenient => Combined;

    /// Semantic tags for an image URL.
    image_tags, image_tags_lenient => ImageTags;
}
