//! Integration tests for the streaming pipeline.
//!
//! Drives `ChatClient` over the mock transport with scripted chunk
//! boundaries and failures, and the `App` message handling on top of it.

use std::sync::Arc;

use bytes::Bytes;
use futures_util::StreamExt;

use trickle::adapters::mock::{MockHttpClient, MockResponse};
use trickle::app::{App, AppMessage, SessionStatus, StreamSession, STREAM_ERROR_MESSAGE};
use trickle::client::{ChatClient, ClientError};
use trickle::models::{ChatRequest, Role};
use trickle::traits::HttpError;

fn client_for_chunks(chunks: Vec<Result<Bytes, HttpError>>) -> ChatClient {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::Stream { status: 200, chunks });
    ChatClient::with_base_url(Arc::new(http), "http://mock".to_string())
}

async fn collect_contents(client: &ChatClient) -> Vec<String> {
    let request = ChatRequest::new("hi".to_string());
    let mut stream = client.stream(&request).await.unwrap();
    let mut texts = Vec::new();
    while let Some(result) = stream.next().await {
        texts.push(result.unwrap().text);
    }
    texts
}

fn app_with_session() -> App {
    let http = Arc::new(MockHttpClient::new());
    let mut app = App::new(Arc::new(ChatClient::new(http)));
    app.log.push_user("hi".to_string());
    app.session = Some(StreamSession::new());
    app.handle_message(AppMessage::StreamStarted);
    app
}

/// Run a scripted byte stream through the client and fold the resulting
/// messages into an app, as the event loop would.
async fn run_session(app: &mut App, chunks: Vec<Result<Bytes, HttpError>>) {
    let client = client_for_chunks(chunks);
    let request = ChatRequest::new("hi".to_string());

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    match client.stream(&request).await {
        Ok(mut stream) => {
            let _ = tx.send(AppMessage::StreamStarted);
            App::process_stream(&mut stream, &tx).await;
        }
        Err(e) => {
            let _ = tx.send(AppMessage::StreamError {
                error: e.to_string(),
            });
        }
    }
    drop(tx);
    while let Some(msg) = rx.recv().await {
        app.handle_message(msg);
    }
}

// ---------------------------------------------------------------------------
// Chunk-boundary invariance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn final_content_is_invariant_under_chunk_boundaries() {
    // Multi-byte characters and a malformed frame in the middle; every
    // two-chunk split of the byte stream must produce the same result,
    // including splits inside "é", "ö", and the "data:" prefix.
    let wire = "data: {\"content\":\"Héllo \"}\ndata: not-json\ndata: {\"content\":\"wörld\"}\n";
    let bytes = wire.as_bytes();

    for split in 0..=bytes.len() {
        let client = client_for_chunks(vec![
            Ok(Bytes::copy_from_slice(&bytes[..split])),
            Ok(Bytes::copy_from_slice(&bytes[split..])),
        ]);
        let contents = collect_contents(&client).await;
        assert_eq!(
            contents.concat(),
            "Héllo wörld",
            "split at byte {} changed the result",
            split
        );
    }
}

#[tokio::test]
async fn byte_at_a_time_delivery_matches_single_chunk() {
    let wire = "data: {\"content\":\"A\"}\ndata: {\"content\":\"B\"}\n";

    let single = client_for_chunks(vec![Ok(Bytes::from(wire))]);
    let trickled = client_for_chunks(
        wire.as_bytes()
            .iter()
            .map(|b| Ok(Bytes::copy_from_slice(std::slice::from_ref(b))))
            .collect(),
    );

    assert_eq!(
        collect_contents(&single).await.concat(),
        collect_contents(&trickled).await.concat()
    );
}

// ---------------------------------------------------------------------------
// Frame delivery rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unterminated_trailing_frame_is_dropped() {
    let client = client_for_chunks(vec![Ok(Bytes::from(
        "data: {\"content\":\"kept\"}\ndata: {\"content\":\"lost\"}",
    ))]);
    assert_eq!(collect_contents(&client).await, vec!["kept"]);
}

#[tokio::test]
async fn terminated_frame_is_delivered() {
    let client = client_for_chunks(vec![Ok(Bytes::from(
        "data: {\"content\":\"kept\"}\ndata: {\"content\":\"also kept\"}\n",
    ))]);
    assert_eq!(collect_contents(&client).await, vec!["kept", "also kept"]);
}

#[tokio::test]
async fn malformed_frame_between_valid_ones_is_skipped() {
    let client = client_for_chunks(vec![Ok(Bytes::from(
        "data: {\"content\":\"A\"}\ndata: {broken\ndata: {\"content\":\"B\"}\n",
    ))]);
    assert_eq!(collect_contents(&client).await, vec!["A", "B"]);
}

#[tokio::test]
async fn non_event_lines_are_ignored() {
    let client = client_for_chunks(vec![Ok(Bytes::from(
        ": keep-alive\nevent: content\n\ndata: {\"content\":\"X\"}\nrandom noise\n",
    ))]);
    assert_eq!(collect_contents(&client).await, vec!["X"]);
}

#[tokio::test]
async fn content_field_absent_yields_empty_fragment() {
    let client = client_for_chunks(vec![Ok(Bytes::from(
        "data: {\"done\":true}\ndata: {\"content\":\"X\"}\n",
    ))]);
    assert_eq!(collect_contents(&client).await, vec!["", "X"]);
}

// ---------------------------------------------------------------------------
// Scenario A: prefix split across chunks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_a_frame_split_mid_payload() {
    let mut app = app_with_session();
    run_session(
        &mut app,
        vec![
            Ok(Bytes::from("data: {\"content\":\"Hel")),
            Ok(Bytes::from("lo\"}\n")),
        ],
    )
    .await;

    // One user message and exactly one assistant message reading "Hello".
    assert_eq!(app.log.len(), 2);
    let assistant = &app.log.messages()[1];
    assert_eq!(assistant.role, Role::Assistant);
    assert_eq!(assistant.content, "Hello");
    assert!(!app.is_streaming());
}

// ---------------------------------------------------------------------------
// Scenario B: transport rejection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_b_rejected_response_appends_one_error_message() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::Stream {
        status: 503,
        chunks: Vec::new(),
    });
    let client = ChatClient::with_base_url(Arc::new(http), "http://mock".to_string());

    let request = ChatRequest::new("hi".to_string());
    let result = client.stream(&request).await;
    assert!(matches!(result, Err(ClientError::Rejected { status: 503 })));

    // App-level outcome: exactly one assistant entry with the fixed text,
    // indicator lowered.
    let mut app = app_with_session();
    app.handle_message(AppMessage::StreamError {
        error: "Server rejected request (status 503)".to_string(),
    });

    assert_eq!(app.log.len(), 2);
    assert_eq!(app.log.messages()[1].content, STREAM_ERROR_MESSAGE);
    assert!(!app.is_streaming());
}

#[tokio::test]
async fn missing_body_fails_the_session() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::NoBody { status: 200 });
    let client = ChatClient::with_base_url(Arc::new(http), "http://mock".to_string());

    let request = ChatRequest::new("hi".to_string());
    let result = client.stream(&request).await;
    assert!(matches!(result, Err(ClientError::MissingBody)));
}

// ---------------------------------------------------------------------------
// Scenario C: two frames in one chunk, intermediate state observable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_c_two_frames_one_chunk() {
    let client = client_for_chunks(vec![Ok(Bytes::from(
        "data: {\"content\":\"A\"}\ndata: {\"content\":\"B\"}\n",
    ))]);
    let request = ChatRequest::new("hi".to_string());
    let mut stream = client.stream(&request).await.unwrap();

    let mut app = app_with_session();

    // First event: intermediate observable state is "A".
    let first = stream.next().await.unwrap().unwrap();
    app.handle_message(AppMessage::StreamToken { token: first.text });
    assert_eq!(app.log.len(), 2);
    assert_eq!(app.log.messages()[1].content, "A");

    // Second event supersedes it in place.
    let second = stream.next().await.unwrap().unwrap();
    app.handle_message(AppMessage::StreamToken { token: second.text });
    assert_eq!(app.log.len(), 2);
    assert_eq!(app.log.messages()[1].content, "AB");

    assert!(stream.next().await.is_none());
}

// ---------------------------------------------------------------------------
// Scenario D: malformed frame then a valid one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_d_malformed_then_valid() {
    let mut app = app_with_session();
    run_session(
        &mut app,
        vec![Ok(Bytes::from("data: not-json\ndata: {\"content\":\"X\"}\n"))],
    )
    .await;

    assert_eq!(app.log.len(), 2);
    assert_eq!(app.log.messages()[1].content, "X");
    assert!(!app.is_streaming());
}

// ---------------------------------------------------------------------------
// Mid-stream failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mid_stream_error_keeps_partial_and_appends_error_entry() {
    let mut app = app_with_session();
    run_session(
        &mut app,
        vec![
            Ok(Bytes::from("data: {\"content\":\"partial answ\"}\n")),
            Err(HttpError::Io("connection reset".to_string())),
        ],
    )
    .await;

    // The partial content survives untouched; the error is a distinct entry
    // after it, so two consecutive assistant messages are expected.
    assert_eq!(app.log.len(), 3);
    assert_eq!(app.log.messages()[1].content, "partial answ");
    assert!(!app.log.messages()[1].is_streaming);
    assert_eq!(app.log.messages()[2].content, STREAM_ERROR_MESSAGE);
    assert_eq!(
        app.session.as_ref().map(|s| s.status),
        Some(SessionStatus::Failed)
    );
    assert!(!app.is_streaming());
}

// ---------------------------------------------------------------------------
// Accumulator idempotence and reset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn n_updates_yield_one_assistant_entry() {
    let mut app = app_with_session();
    run_session(
        &mut app,
        vec![Ok(Bytes::from(
            "data: {\"content\":\"a\"}\ndata: {\"content\":\"b\"}\ndata: {\"content\":\"c\"}\ndata: {\"content\":\"d\"}\n",
        ))],
    )
    .await;

    assert_eq!(app.log.len(), 2);
    assert_eq!(app.log.messages()[1].content, "abcd");
}

#[tokio::test]
async fn reset_empties_log_regardless_of_session() {
    let mut app = app_with_session();
    app.handle_message(AppMessage::StreamToken {
        token: "in flight".to_string(),
    });
    assert!(!app.log.is_empty());
    assert!(app.is_streaming());

    app.reset_conversation();

    assert!(app.log.is_empty());
}
