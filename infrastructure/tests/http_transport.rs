//! Integration tests for the HTTP chat transport using wiremock.

use futures::StreamExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use streamchat_application::{
    ChatController, ChatTransport, StreamReplyUseCase, StreamSink, TransportError,
};
use streamchat_domain::{ChatRequest, Conversation, Message, SessionPhase};
use streamchat_infrastructure::HttpChatTransport;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl StreamSink for RecordingSink {
    fn on_delta(&self, accumulated: &str) {
        self.push(format!("delta:{accumulated}"));
    }

    fn on_stream_error(&self, message: &str) {
        self.push(format!("stream_error:{message}"));
    }

    fn on_fatal_error(&self, message: &str) {
        self.push(format!("fatal:{message}"));
    }

    fn on_complete(&self, final_text: &str) {
        self.push(format!("complete:{final_text}"));
    }
}

fn sse_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream")
}

fn hello_request() -> ChatRequest {
    ChatRequest::new(vec![Message::user("Hi")], "Be brief.")
}

#[tokio::test]
async fn posts_json_and_streams_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "messages": [{"role": "user", "content": "Hi"}],
            "system_prompt": "Be brief.",
        })))
        .respond_with(sse_response(
            "data: {\"content\":\"Hel\"}\n\ndata: {\"content\":\"lo\"}\n\ndata: [DONE]\n\n",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpChatTransport::new(&server.uri()).unwrap();
    let mut body = transport.open_stream(&hello_request()).await.unwrap();

    let mut raw = Vec::new();
    while let Some(chunk) = body.next().await {
        raw.extend_from_slice(&chunk.unwrap());
    }
    let raw = String::from_utf8(raw).unwrap();
    assert!(raw.starts_with("data: {\"content\":\"Hel\"}"));
    assert!(raw.ends_with("data: [DONE]\n\n"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let transport = HttpChatTransport::new(&server.uri()).unwrap();
    let result = transport.open_stream(&hello_request()).await;

    match result {
        Err(err) => {
            assert_eq!(err, TransportError::Status(500));
            assert_eq!(err.to_string(), "Server error: 500");
        }
        Ok(_) => panic!("expected a status error"),
    }
}

#[tokio::test]
async fn custom_chat_path_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/chat"))
        .respond_with(sse_response("data: {\"content\":\"ok\"}\n"))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/api/v2/", server.uri());
    let transport =
        HttpChatTransport::with_settings(&base, "/chat", Some(Duration::from_secs(2))).unwrap();
    assert!(transport.endpoint().ends_with("/api/v2/chat"));

    let use_case = StreamReplyUseCase::new(Arc::new(transport));
    let report = use_case
        .execute(&hello_request(), &RecordingSink::default())
        .await;
    assert_eq!(report.text, "ok");
}

#[tokio::test]
async fn connection_refused_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let transport = HttpChatTransport::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let result = transport.open_stream(&hello_request()).await;

    assert!(matches!(result, Err(TransportError::Connection(_))));
}

#[tokio::test]
async fn stream_reply_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(sse_response(
            "data: {\"content\":\"Hel\"}\n\
             : keep-alive\n\
             data: not json\n\
             data: {\"content\":\"lo\"}\n\
             data: [DONE]\n",
        ))
        .mount(&server)
        .await;

    let transport = HttpChatTransport::new(&server.uri()).unwrap();
    let use_case = StreamReplyUseCase::new(Arc::new(transport));
    let sink = RecordingSink::default();

    let report = use_case.execute(&hello_request(), &sink).await;

    assert_eq!(report.outcome, SessionPhase::StreamingSuccess);
    assert_eq!(report.text, "Hello");
    assert_eq!(report.content_frames, 2);
    assert_eq!(report.discarded_frames, 1);
    assert_eq!(
        sink.events(),
        vec!["delta:Hel", "delta:Hello", "complete:Hello"]
    );
}

#[tokio::test]
async fn controller_commits_reply_from_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(sse_response(
            "data: {\"content\":\"Rust is a systems language.\"}\ndata: [DONE]\n",
        ))
        .mount(&server)
        .await;

    let transport = Arc::new(HttpChatTransport::new(&server.uri()).unwrap());
    let controller = ChatController::new(transport, Conversation::new("Be brief."));
    let sink = RecordingSink::default();

    let report = controller
        .send("What is Rust?", &sink, &CancellationToken::new())
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(
        controller.history(),
        vec![
            Message::user("What is Rust?"),
            Message::assistant("Rust is a systems language."),
        ]
    );
    assert_eq!(controller.title(), "What is Rust?");
}

#[tokio::test]
async fn controller_reports_server_error_frame() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(sse_response("data: {\"error\":\"model overloaded\"}\n"))
        .mount(&server)
        .await;

    let transport = Arc::new(HttpChatTransport::new(&server.uri()).unwrap());
    let controller = ChatController::new(transport, Conversation::default());
    let sink = RecordingSink::default();

    let report = controller
        .send("Hi", &sink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionPhase::StreamingError);
    assert_eq!(sink.events(), vec!["stream_error:model overloaded"]);
    assert_eq!(controller.history(), vec![Message::user("Hi")]);
}

#[tokio::test]
async fn cancellation_before_headers_stops_the_send() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(sse_response("data: {\"content\":\"late\"}\n").set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let transport = Arc::new(HttpChatTransport::new(&server.uri()).unwrap());
    let use_case = StreamReplyUseCase::new(transport);
    let sink = RecordingSink::default();
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let report = tokio::time::timeout(
        Duration::from_secs(5),
        use_case.execute_with_cancellation(&hello_request(), &sink, &cancel),
    )
    .await
    .unwrap();

    assert!(report.cancelled);
    assert!(report.text.is_empty());
    assert!(sink.events().is_empty());
}
