//! Dispatch behaviour with an in-process transport.

mod support;

use aylien_textapi::{Endpoint, Error, ErrorKind, Method, Params, TextApiClient};
use std::sync::Arc;
use support::{client_with, RecordingTransport};

#[tokio::test]
async fn test_every_operation_name_reaches_its_path() {
    let transport = RecordingTransport::ok("{}");
    let client = client_with(transport.clone());

    for endpoint in Endpoint::ALL {
        let params = Params::new().with("taxonomy", "iab-qag");
        client
            .call_by_name(endpoint.name(), ("some text", params))
            .await
            .unwrap();
        let sent = transport.last().unwrap();
        let expected = endpoint.resolve_path(Some("iab-qag")).unwrap();
        assert_eq!(sent.url, format!("https://api.test.local/api/v1/{expected}"));
        assert_eq!(sent.method, Method::Post);
    }
    assert_eq!(transport.count(), Endpoint::ALL.len());
}

#[tokio::test]
async fn test_named_methods_match_descriptors() {
    let transport = RecordingTransport::ok("{}");
    let client = client_with(transport.clone());

    client.extract("http://example.com/a").await.unwrap();
    assert!(transport.last().unwrap().url.ends_with("/extract"));
    client.classify("text").await.unwrap();
    assert!(transport.last().unwrap().url.ends_with("/classify"));
    client.unsupervised_classify("text").await.unwrap();
    assert!(transport.last().unwrap().url.ends_with("/classify/unsupervised"));
    client.microformats("http://example.com/a").await.unwrap();
    assert!(transport.last().unwrap().url.ends_with("/microformats"));
    client.summarize("text").await.unwrap();
    assert!(transport.last().unwrap().url.ends_with("/summarize"));
    client.image_tags("http://example.com/a.png").await.unwrap();
    assert!(transport.last().unwrap().url.ends_with("/image-tags"));
}

#[tokio::test]
async fn test_url_inputs_never_become_text() {
    let transport = RecordingTransport::ok("{}");
    let client = client_with(transport.clone());

    let urls = [
        "http://example.com/a",
        "https://news.example.co.uk/2014/05/story.html",
        "http://example.org:8080/",
    ];
    for endpoint in [Endpoint::Sentiment, Endpoint::Related, Endpoint::Concepts] {
        for url in urls {
            client.call(endpoint, url).await.unwrap();
            let sent = transport.last().unwrap();
            assert_eq!(sent.params, vec![("url".to_string(), url.to_string())]);
        }
    }
}

#[tokio::test]
async fn test_plain_inputs_become_text_or_phrase() {
    let transport = RecordingTransport::ok("{}");
    let client = client_with(transport.clone());

    for value in ["breaking news today", "example.com", "www.example"] {
        client.related(value).await.unwrap();
        assert_eq!(
            transport.last().unwrap().params,
            vec![("phrase".to_string(), value.to_string())]
        );

        client.hashtags(value).await.unwrap();
        assert_eq!(
            transport.last().unwrap().params,
            vec![("text".to_string(), value.to_string())]
        );
    }
}

#[tokio::test]
async fn test_existing_url_ignores_positional_value() {
    let transport = RecordingTransport::ok("{}");
    let client = client_with(transport.clone());

    let params = Params::new().with("url", "http://example.com/original");
    client
        .entities(("ignored positional text", params))
        .await
        .unwrap();
    assert_eq!(
        transport.last().unwrap().params,
        vec![("url".to_string(), "http://example.com/original".to_string())]
    );
}

#[tokio::test]
async fn test_url_positional_joins_caller_text() {
    let transport = RecordingTransport::ok("{}");
    let client = client_with(transport.clone());

    let params = Params::new().with("text", "caller text");
    client.hashtags(("http://b.com/2", params)).await.unwrap();
    assert_eq!(
        transport.last().unwrap().params,
        vec![
            ("text".to_string(), "caller text".to_string()),
            ("url".to_string(), "http://b.com/2".to_string()),
        ]
    );

    let params = Params::new().with("text", "Body").with("title", "Headline");
    client.summarize(("http://b.com/2", params)).await.unwrap();
    assert_eq!(
        transport.last().unwrap().params,
        vec![
            ("text".to_string(), "Body".to_string()),
            ("title".to_string(), "Headline".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_lenient_on_simulated_failure() {
    let transport = RecordingTransport::failing("connection reset by peer");
    let client = client_with(transport.clone());

    assert_eq!(client.sentiment_lenient("fine").await.unwrap(), None);

    let err = client.sentiment("fine").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("connection reset by peer"));
    assert_eq!(transport.count(), 2);
}

#[tokio::test]
async fn test_strict_keeps_status_and_message() {
    let transport = RecordingTransport::status(503, r#"{"error":"Service Unavailable"}"#);
    let client = client_with(transport);

    assert!(client.language_lenient("hello").await.unwrap().is_none());
    match client.language("hello").await.unwrap_err() {
        Error::ServerError { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body() {
    let transport = RecordingTransport::ok("<html>not json</html>");
    let client = client_with(transport);

    assert!(client.concepts_lenient("text").await.unwrap().is_none());
    assert_eq!(
        client.concepts("text").await.unwrap_err().kind(),
        ErrorKind::Decode
    );
}

#[tokio::test]
async fn test_rate_limits_probe_uses_language_endpoint() {
    let transport = RecordingTransport::with_headers(
        200,
        vec![
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "59"),
            ("x-ratelimit-reset", "1800000000"),
        ],
        r#"{"lang":"en"}"#,
    );
    let client = client_with(transport.clone());

    let limits = client.rate_limits().await.unwrap().unwrap();
    assert_eq!(limits.limit, Some(60));
    assert_eq!(transport.count(), 1);
    let probe = transport.last().unwrap();
    assert!(probe.url.ends_with("/language"));
    assert_eq!(probe.params, vec![("text".to_string(), "Hello".to_string())]);

    client.rate_limits().await.unwrap();
    assert_eq!(transport.count(), 1);
    assert_eq!(client.signals().calls_made, 1);
}

#[tokio::test]
async fn test_rate_limits_probe_rejected_with_quota() {
    let transport = RecordingTransport::with_headers(
        429,
        vec![("x-ratelimit-remaining", "0")],
        r#"{"error":"Too Many Requests"}"#,
    );
    let client = client_with(transport.clone());

    let limits = client.rate_limits().await.unwrap().unwrap();
    assert!(limits.is_exhausted());
}

#[tokio::test]
async fn test_rate_limits_probe_failure_without_quota() {
    let transport = RecordingTransport::failing("dns failure");
    let client = client_with(transport.clone());

    let err = client.rate_limits().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);

    // No second probe once a call has been attempted.
    assert_eq!(client.rate_limits().await.unwrap(), None);
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_client_is_shareable_across_tasks() {
    let transport = RecordingTransport::ok(r#"{"polarity":"positive"}"#);
    let client: Arc<TextApiClient> = Arc::new(client_with(transport.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.sentiment(format!("message number {i}")).await
        }));
    }
    for h in handles {
        assert_eq!(h.await.unwrap().unwrap()["polarity"], "positive");
    }
    assert_eq!(transport.count(), 8);
    assert_eq!(client.calls_made(), 8);
}
