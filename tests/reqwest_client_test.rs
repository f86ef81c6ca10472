//! End-to-end tests for the reqwest transport adapter.
//!
//! Runs the real `ReqwestHttpClient` against a wiremock server.

use std::sync::Arc;

use futures_util::StreamExt;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trickle::adapters::ReqwestHttpClient;
use trickle::client::{ChatClient, ClientError};
use trickle::models::ChatRequest;

fn chat_client(base_url: String) -> ChatClient {
    ChatClient::with_base_url(Arc::new(ReqwestHttpClient::new()), base_url)
}

#[tokio::test]
async fn streams_events_from_http_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("Accept", "text/event-stream"))
        .and(body_string_contains("\"message\":\"hello\""))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "data: {\"content\":\"Hello\"}\ndata: {\"content\":\", world\"}\n",
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let client = chat_client(server.uri());
    let request = ChatRequest::new("hello".to_string());

    let mut stream = client.stream(&request).await.unwrap();
    let mut contents = Vec::new();
    while let Some(result) = stream.next().await {
        contents.push(result.unwrap().text);
    }

    assert_eq!(contents, vec!["Hello", ", world"]);
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = chat_client(server.uri());
    let request = ChatRequest::new("hello".to_string());

    let result = client.stream(&request).await;
    assert!(matches!(result, Err(ClientError::Rejected { status: 503 })));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Port from the reserved range, nothing listens there.
    let client = chat_client("http://127.0.0.1:59999".to_string());
    let request = ChatRequest::new("hello".to_string());

    let result = client.stream(&request).await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}
