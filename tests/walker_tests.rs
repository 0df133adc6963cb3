//! Integration tests for next-link pagination.
//!
//! These tests verify item ordering, completion, failure handling, and the
//! loop and page-limit guards of a walk.

mod common;

use std::ops::ControlFlow;

use common::{FakeTransport, ENDPOINT};
use rest_resource::{
    ClientConfig, ConfigError, HttpError, ResourceClient, RestError, WalkOptions, WalkSummary,
};
use serde_json::{json, Value};

fn client_with(transport: FakeTransport) -> ResourceClient<FakeTransport> {
    let client = ResourceClient::with_transport(ClientConfig::default(), transport);
    client.set_endpoint(ENDPOINT);
    client
}

fn page(items: Value, next: Option<&str>) -> Value {
    match next {
        Some(next) => json!({"data": items, "links": {"next": next}}),
        None => json!({"data": items, "links": {}}),
    }
}

#[tokio::test]
async fn test_walk_follows_next_links_in_order() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!(["r1", "r2"]), Some("/articles?limit=1&offset=2")))
            .respond(200, page(json!(["r3"]), None)),
    );
    let options = WalkOptions::new().filter("title", "sample title").limit(1);
    let mut seen = Vec::new();

    let summary = client
        .walk_resources("/articles", &options, |item| seen.push(item))
        .await
        .unwrap();

    assert_eq!(seen, vec![json!("r1"), json!("r2"), json!("r3")]);
    assert_eq!(
        summary,
        WalkSummary {
            pages: 2,
            items: 3,
            stopped_early: false,
        }
    );
    assert_eq!(
        client.transport().urls(),
        vec![
            "http://192.168.99.100:8080/articles?filters%5Btitle%5D=sample%20title&limit=1",
            "http://192.168.99.100:8080/articles?limit=1&offset=2",
        ]
    );
}

#[tokio::test]
async fn test_walk_single_empty_page_completes() {
    let client = client_with(FakeTransport::new().respond(200, json!([])));
    let mut calls = 0;

    let summary = client
        .walk_resources("/articles", &WalkOptions::new(), |_| calls += 1)
        .await
        .unwrap();

    assert_eq!(calls, 0);
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.items, 0);
    assert_eq!(client.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_walk_empty_page_with_next_link_continues() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([]), Some("/articles?page=2")))
            .respond(200, page(json!([{"id": 3}]), None)),
    );
    let mut seen = Vec::new();

    let summary = client
        .walk_resources("/articles", &WalkOptions::new(), |item| seen.push(item))
        .await
        .unwrap();

    assert_eq!(seen, vec![json!({"id": 3})]);
    assert_eq!(summary.pages, 2);
}

#[tokio::test]
async fn test_walk_first_page_failure_dispatches_nothing() {
    let client = client_with(FakeTransport::new().respond(503, json!({"error": "unavailable"})));
    let mut calls = 0;

    let error = client
        .walk_resources("/articles", &WalkOptions::new(), |_| calls += 1)
        .await
        .unwrap_err();

    assert_eq!(calls, 0);
    assert_eq!(error.status(), Some(503));
    assert_eq!(client.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_walk_second_page_failure_keeps_first_items() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}, {"id": 2}]), Some("/articles?page=2")))
            .fail("connection reset"),
    );
    let mut seen = Vec::new();

    let error = client
        .walk_resources("/articles", &WalkOptions::new(), |item| seen.push(item))
        .await
        .unwrap_err();

    assert_eq!(seen.len(), 2);
    assert!(matches!(error, RestError::Http(HttpError::Transport(_))));
    assert_eq!(client.transport().calls().len(), 2);
}

#[tokio::test]
async fn test_walk_without_endpoint_fails_before_request() {
    let client = ResourceClient::with_transport(ClientConfig::default(), FakeTransport::new());

    let error = client
        .walk_resources("/articles", &WalkOptions::new(), |_| {})
        .await
        .unwrap_err();

    assert!(error.is_not_configured());
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn test_walk_detects_repeated_next_link() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}]), Some("/articles?page=2")))
            .respond(200, page(json!([{"id": 2}]), Some("/articles?page=2"))),
    );
    let mut seen = Vec::new();

    let error = client
        .walk_resources("/articles", &WalkOptions::new(), |item| seen.push(item))
        .await
        .unwrap_err();

    assert_eq!(seen.len(), 2);
    assert!(matches!(
        error,
        RestError::PaginationLoop { ref link } if link == "http://192.168.99.100:8080/articles?page=2"
    ));
    assert_eq!(client.transport().calls().len(), 2);
}

#[tokio::test]
async fn test_walk_stops_at_page_limit() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}]), Some("/articles?page=2")))
            .respond(200, page(json!([{"id": 2}]), Some("/articles?page=3"))),
    );
    let options = WalkOptions::new().max_pages(2);
    let mut seen = Vec::new();

    let error = client
        .walk_resources("/articles", &options, |item| seen.push(item))
        .await
        .unwrap_err();

    assert_eq!(seen.len(), 2);
    assert!(matches!(error, RestError::PageLimitExceeded { max_pages: 2 }));
    assert_eq!(client.transport().calls().len(), 2);
}

#[tokio::test]
async fn test_walk_page_limit_defaults_from_config() {
    let config = ClientConfig::builder()
        .endpoint(ENDPOINT)
        .max_pages(1)
        .build()
        .unwrap();
    let client = ResourceClient::with_transport(
        config,
        FakeTransport::new().respond(200, page(json!([{"id": 1}]), Some("/articles?page=2"))),
    );

    let error = client
        .walk_resources("/articles", &WalkOptions::new(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(error, RestError::PageLimitExceeded { max_pages: 1 }));
}

#[tokio::test]
async fn test_walk_last_page_at_limit_completes() {
    let client = client_with(FakeTransport::new().respond(200, page(json!([{"id": 1}]), None)));
    let options = WalkOptions::new().max_pages(1);

    let summary = client
        .walk_resources("/articles", &options, |_| {})
        .await
        .unwrap();

    assert_eq!(summary.pages, 1);
}

#[tokio::test]
async fn test_try_walk_break_stops_dispatch_and_fetching() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}, {"id": 2}]), Some("/articles?page=2")))
            .respond(200, page(json!([{"id": 3}]), None)),
    );
    let mut seen = Vec::new();

    let summary = client
        .try_walk_resources("/articles", &WalkOptions::new(), |item| {
            seen.push(item);
            ControlFlow::Break(())
        })
        .await
        .unwrap();

    assert_eq!(seen, vec![json!({"id": 1})]);
    assert!(summary.stopped_early);
    assert_eq!(summary.pages, 1);
    assert_eq!(client.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_walk_follows_link_header() {
    let client = client_with(
        FakeTransport::new()
            .respond_with_link(
                200,
                json!([{"id": 1}]),
                r#"<http://192.168.99.100:8080/articles?page_info=abc>; rel="next""#,
            )
            .respond(200, json!([{"id": 2}])),
    );
    let mut seen = Vec::new();

    client
        .walk_resources("/articles", &WalkOptions::new(), |item| seen.push(item))
        .await
        .unwrap();

    assert_eq!(seen.len(), 2);
    assert_eq!(
        client.transport().urls()[1],
        "http://192.168.99.100:8080/articles?page_info=abc"
    );
}

#[tokio::test]
async fn test_walk_follows_link_header_with_comma_in_url() {
    let client = client_with(
        FakeTransport::new()
            .respond_with_link(
                200,
                json!([{"id": 1}]),
                r#"<http://192.168.99.100:8080/articles?fields=id,title&page=2>; rel="next""#,
            )
            .respond(200, json!([{"id": 2}])),
    );

    let summary = client
        .walk_resources("/articles", &WalkOptions::new(), |_| {})
        .await
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(
        client.transport().urls()[1],
        "http://192.168.99.100:8080/articles?fields=id%2Ctitle&page=2"
    );
}

#[tokio::test]
async fn test_walk_replays_plus_as_space() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}]), Some("/articles?q=sample+title&page=2")))
            .respond(200, page(json!([{"id": 2}]), None)),
    );

    client
        .walk_resources("/articles", &WalkOptions::new(), |_| {})
        .await
        .unwrap();

    assert_eq!(
        client.transport().urls()[1],
        "http://192.168.99.100:8080/articles?q=sample%20title&page=2"
    );
}

#[tokio::test]
async fn test_walk_rejects_zero_page_limit() {
    let client = client_with(FakeTransport::new().respond(200, json!([{"id": 1}])));
    let options = WalkOptions::new().max_pages(0);

    let error = client
        .walk_resources("/articles", &options, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        RestError::Config(ConfigError::InvalidMaxPages { value: 0 })
    ));
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn test_walk_follows_foreign_origin_link() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}]), Some("http://cdn.example.com:9000/articles?page=2")))
            .respond(200, page(json!([{"id": 2}]), None)),
    );

    client
        .walk_resources("/articles", &WalkOptions::new(), |_| {})
        .await
        .unwrap();

    assert_eq!(
        client.transport().urls()[1],
        "http://cdn.example.com:9000/articles?page=2"
    );
}

#[tokio::test]
async fn test_page_walker_yields_pages_then_none() {
    let client = client_with(
        FakeTransport::new()
            .respond(200, page(json!([{"id": 1}]), Some("?page=2")))
            .respond(200, page(json!([{"id": 2}]), None)),
    );
    let mut walker = client.walker("/articles", &WalkOptions::new()).unwrap();

    let first = walker.next_page().await.unwrap().unwrap();
    assert_eq!(first.items, vec![json!({"id": 1})]);
    assert!(!walker.is_finished());

    let second = walker.next_page().await.unwrap().unwrap();
    assert_eq!(second.items, vec![json!({"id": 2})]);
    assert!(walker.is_finished());

    assert!(walker.next_page().await.unwrap().is_none());
    assert_eq!(walker.pages_fetched(), 2);
    assert_eq!(
        client.transport().urls(),
        vec![
            "http://192.168.99.100:8080/articles",
            "http://192.168.99.100:8080/articles?page=2",
        ]
    );
}

#[tokio::test]
async fn test_page_walker_after_failure_returns_none() {
    let client = client_with(FakeTransport::new().respond(500, json!({})));
    let mut walker = client.walker("/articles", &WalkOptions::new()).unwrap();

    assert!(walker.next_page().await.is_err());
    assert!(walker.is_finished());
    assert!(walker.next_page().await.unwrap().is_none());
    assert_eq!(client.transport().calls().len(), 1);
}

#[test]
fn test_walk_runs_on_blocking_runtime() {
    let client = client_with(FakeTransport::new().respond(200, json!([{"id": 1}])));

    let summary = tokio_test::block_on(client.walk_resources("/articles", &WalkOptions::new(), |_| {}))
        .unwrap();

    assert_eq!(summary.items, 1);
}
