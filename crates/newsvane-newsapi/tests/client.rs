//! Integration tests for `NewsApiClient` using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use newsvane_newsapi::{EverythingParams, NewsApiClient, NewsApiError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NewsApiClient {
    NewsApiClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn test_params() -> EverythingParams {
    EverythingParams {
        query: "(climate) AND (Sweden OR Swedish)".to_string(),
        language: "en".to_string(),
        page_size: 20,
        from: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        to: Utc.with_ymd_and_hms(2026, 8, 5, 0, 0, 0).unwrap(),
        sort_by: "publishedAt".to_string(),
        domains: None,
    }
}

#[tokio::test]
async fn everything_returns_parsed_articles() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": { "id": null, "name": "Example News" },
                "author": "A. Smith",
                "title": "Climate policy gains momentum",
                "description": "Parliament debates a new climate bill",
                "url": "https://example.com/a1",
                "publishedAt": "2026-08-03T09:00:00Z",
                "content": "Full article body"
            },
            {
                "source": { "id": "gt", "name": "Global Times" },
                "author": null,
                "title": "Economy and climate talks stall",
                "description": null,
                "url": "https://example.com/a2",
                "publishedAt": "2026-08-04T11:30:00Z",
                "content": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("language", "en"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let articles = client
        .everything(&test_params(), 1)
        .await
        .expect("should parse articles");

    assert_eq!(articles.len(), 2);
    assert_eq!(
        articles[0].title.as_deref(),
        Some("Climate policy gains momentum")
    );
    assert_eq!(
        articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
        Some("Example News")
    );
    assert_eq!(articles[1].author, None);
    assert_eq!(articles[1].content, None);
}

#[tokio::test]
async fn everything_tolerates_missing_article_fields() {
    let server = MockServer::start().await;

    // A degenerate item with no fields at all must not fail the page.
    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 1,
        "articles": [ {} ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let articles = client.everything(&test_params(), 1).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert!(articles[0].url.is_none());
    assert!(articles[0].title.is_none());
}

#[tokio::test]
async fn everything_returns_empty_for_exhausted_search() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 0,
        "articles": []
    });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let articles = client.everything(&test_params(), 3).await.unwrap();

    assert!(articles.is_empty());
}

#[tokio::test]
async fn non_success_status_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"status":"error","code":"rateLimited"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .everything(&test_params(), 1)
        .await
        .expect_err("should fail on 429");

    match err {
        NewsApiError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("rateLimited"));
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .everything(&test_params(), 1)
        .await
        .expect_err("should fail on malformed body");

    match err {
        NewsApiError::Deserialize { context, .. } => {
            assert!(context.contains("page=1"));
        }
        other => panic!("expected Deserialize error, got: {other:?}"),
    }
}

#[tokio::test]
async fn domains_filter_is_forwarded() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ok", "totalResults": 0, "articles": [] });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("domains", "example.com,other.se"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut params = test_params();
    params.domains = Some("example.com,other.se".to_string());

    let articles = client.everything(&params, 1).await.unwrap();
    assert!(articles.is_empty());
}
