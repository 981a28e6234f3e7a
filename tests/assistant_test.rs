//! Chat screen controller integration tests
//!
//! Drives `Assistant` through a real `ApiClient` against a `wiremock`
//! backend, covering the question/answer flow and the document sidebar.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, document_map, write_file};
use gander::api::UploadFile;
use gander::chat::{Sender, TurnPhase, FALLBACK_ANSWER};
use gander::view::Assistant;

fn assistant_for(server: &MockServer) -> Assistant {
    Assistant::new(Arc::new(client_for(&server.uri())))
}

#[tokio::test]
async fn test_question_and_answer_replace_previous_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "query": "first" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "one" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "query": "second" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "two" })))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    assistant.ask("first").await.unwrap();
    let answer = assistant.ask("second").await.unwrap();
    assert_eq!(answer.sender, Sender::Assistant);
    assert_eq!(answer.content, "two");

    let view = assistant.snapshot();
    assert_eq!(view.chat.current_question().unwrap().content, "second");
    assert_eq!(view.chat.current_answer().unwrap().content, "two");
}

#[tokio::test]
async fn test_server_error_shows_fallback_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    let answer = assistant.ask("What is the landing distance?").await.unwrap();
    assert_eq!(answer.content, FALLBACK_ANSWER);

    let view = assistant.snapshot();
    assert_eq!(view.chat.phase(), TurnPhase::Errored);
    assert!(!view.chat.is_loading());
    assert_eq!(
        view.chat.current_question().unwrap().content,
        "What is the landing distance?"
    );
}

#[tokio::test]
async fn test_late_answer_to_superseded_question_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "query": "slow question" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "stale answer" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "query": "fast question" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "fresh answer" })))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    let (slow, fast) = tokio::join!(
        assistant.ask("slow question"),
        assistant.ask("fast question")
    );

    assert!(slow.is_none());
    assert_eq!(fast.unwrap().content, "fresh answer");

    let view = assistant.snapshot();
    assert_eq!(view.chat.current_question().unwrap().content, "fast question");
    assert_eq!(view.chat.current_answer().unwrap().content, "fresh answer");
    assert_eq!(view.chat.phase(), TurnPhase::Answered);
}

#[tokio::test]
async fn test_upload_paths_then_remove_updates_sidebar() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Files uploaded",
            "document_ids": document_map(&[("0", "a.pdf", true), ("1", "b.docx", true)])
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/remove_file"))
        .and(query_param("file_name", "a.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": document_map(&[("0", "a.pdf", false), ("1", "b.docx", true)])
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_file(&dir, "a.pdf", "%PDF-1.4"),
        write_file(&dir, "b.docx", "docx"),
    ];

    let assistant = assistant_for(&server);
    assistant.upload_paths(&paths).await.unwrap();
    assert_eq!(
        assistant.snapshot().files.files().names(),
        vec!["a.pdf", "b.docx"]
    );

    assistant.remove("a.pdf").await.unwrap();
    let view = assistant.snapshot();
    assert_eq!(view.files.files().names(), vec!["b.docx"]);
    assert!(!view.files.is_loading());
}

#[tokio::test]
async fn test_failed_remove_keeps_previous_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_all_files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document_ids": document_map(&[("0", "manual.pdf", true)])
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/remove_file"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    assistant.refresh_files().await.unwrap();

    let err = assistant.remove("manual.pdf").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to remove file");

    let view = assistant.snapshot();
    assert_eq!(view.files.files().names(), vec!["manual.pdf"]);
    assert!(!view.files.is_loading());
}

#[tokio::test]
async fn test_file_list_survives_failed_question() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_all_files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document_ids": document_map(&[("0", "manual.pdf", true)])
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    assistant.refresh_files().await.unwrap();
    assistant.ask("anything").await.unwrap();

    let view = assistant.snapshot();
    assert_eq!(view.files.files().len(), 1);
    assert_eq!(view.chat.current_answer().unwrap().content, FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_upload_and_question_overlap_with_both_loading_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "message": "Files uploaded",
                    "document_ids": document_map(&[("0", "a.pdf", true)])
                }))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "Decision speed" }))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    let mid_flight = async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        assistant.snapshot()
    };

    let (uploaded, answer, during) = tokio::join!(
        assistant.upload(vec![UploadFile::new("a.pdf", b"%PDF".to_vec())]),
        assistant.ask("What is V1?"),
        mid_flight
    );

    assert!(during.files.is_loading());
    assert!(during.chat.is_loading());
    assert!(during.chat.current_answer().is_none());
    assert_eq!(during.chat.current_question().unwrap().content, "What is V1?");

    assert_eq!(uploaded.unwrap().names(), vec!["a.pdf"]);
    assert_eq!(answer.unwrap().content, "Decision speed");

    let view = assistant.snapshot();
    assert!(!view.files.is_loading());
    assert!(!view.chat.is_loading());
    assert_eq!(view.files.files().names(), vec!["a.pdf"]);
    assert_eq!(view.chat.current_answer().unwrap().content, "Decision speed");
}
