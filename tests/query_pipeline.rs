//! End-to-end query flow against a local mock completions server.
//!
//! Exercises the real `ApiClient` over HTTP, the retry controller, and the
//! on-disk transcript store together.

use askgpt::api::ApiClient;
use askgpt::config::Config;
use askgpt::error::{ExecError, QueryError};
use askgpt::exec::ShellRunner;
use askgpt::query::{QueryPipeline, QueryRequest};
use askgpt::transcript::{Subject, TranscriptStore};
use askgpt::types::{QueryOptions, SamplingParams};
use askgpt::ui::{Interaction, RenderSink};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Default)]
struct CollectingSink {
    answers: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RenderSink for CollectingSink {
    fn answer(&self, content: &str) {
        self.answers.lock().unwrap().push(content.to_string());
    }
    fn command_output(&self, _content: &str) {}
    fn info(&self, _text: &str) {}
    fn detail(&self, _text: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, msg: &str) {
        self.errors.lock().unwrap().push(msg.to_string());
    }
}

/// Interaction for flows that must never prompt.
struct NoPrompts;

impl Interaction for NoPrompts {
    fn choose(&self, question: &str, _choices: &[char], _default: char) -> Result<char, ExecError> {
        panic!("unexpected prompt: {question}");
    }

    fn edit(&self, _text: &str) -> Result<Option<String>, ExecError> {
        panic!("unexpected edit");
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "askgpt-it-{name}-{}-{}",
        std::process::id(),
        DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

/// Serve the canned responses in order, one connection each, and return the
/// raw request bodies.
async fn serve(responses: Vec<String>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut bodies = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            let body = loop {
                let n = stream.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break String::new();
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).into_owned();
                if let Some((head, body)) = text.split_once("\r\n\r\n") {
                    let expected = head
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if body.len() >= expected {
                        break body.to_string();
                    }
                }
            };
            let _ = stream.write_all(response.as_bytes()).await;
            bodies.push(body);
        }
        bodies
    });
    (format!("http://{addr}"), handle)
}

fn config_for(base_url: &str, conversations: PathBuf) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.api_key = "test-key".into();
    config.storage.conversations_dir = Some(conversations);
    config.retry.retry_delay = 0.0;
    config.retry.retry_max_delay = 0.0;
    config
}

#[tokio::test]
async fn answered_query_is_saved_and_replayed() {
    let (base_url, server) = serve(vec![
        http_response(
            "200 OK",
            r#"{"choices":[{"text":"\n\nYou are in a forest.","index":0}]}"#,
        ),
        http_response("200 OK", r#"{"choices":[{"text":"A path leads north."}]}"#),
    ])
    .await;
    let dir = temp_dir("replay");
    let config = config_for(&base_url, dir.clone());
    let client = ApiClient::new(&config.api);
    let store = TranscriptStore::from_config(&config);
    let sink = CollectingSink::default();
    let runner = ShellRunner::from_config(&config.exec);
    let pipeline = QueryPipeline::new(&config, &client, &store, &sink, &NoPrompts, &runner);

    for question in ["look around", "go north"] {
        pipeline
            .run(QueryRequest {
                subject: "quest 1",
                scenario: "Zork",
                question,
                params: SamplingParams::from_config(&config.query),
                options: QueryOptions::default(),
            })
            .await
            .unwrap();
    }

    let bodies = server.await.unwrap();
    let first: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(first["model"], config.query.model.as_str());
    assert_eq!(first["stop"][0], "Human: ");
    assert_eq!(first["stop"][1], "AI: ");
    let bootstrap = config.scenario("Zork").unwrap();
    assert_eq!(
        first["prompt"],
        format!("{bootstrap}\nHuman: look around\nAI: ").as_str()
    );

    let second: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
    assert!(second["prompt"]
        .as_str()
        .unwrap()
        .ends_with("Human: look around\nAI: You are in a forest.\nHuman: go north\nAI: "));

    let subject = Subject::parse("quest 1").unwrap();
    assert_eq!(
        store.path_for(&subject),
        dir.join(format!("quest_1{}", config.storage.file_extension))
    );
    assert_eq!(
        store.read(&subject).unwrap(),
        "Human: look around\nAI: You are in a forest.\nHuman: go north\nAI: A path leads north.\n"
    );
    assert_eq!(
        *sink.answers.lock().unwrap(),
        vec!["You are in a forest.", "A path leads north."]
    );
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn rate_limited_then_recovered_with_retry() {
    let (base_url, server) = serve(vec![
        http_response("429 Too Many Requests", r#"{"error":"slow down"}"#),
        http_response("200 OK", r#"{"choices":[{"text":"ok"}]}"#),
    ])
    .await;
    let dir = temp_dir("retry");
    let config = config_for(&base_url, dir.clone());
    let client = ApiClient::new(&config.api);
    let store = TranscriptStore::from_config(&config);
    let sink = CollectingSink::default();
    let runner = ShellRunner::from_config(&config.exec);
    let pipeline = QueryPipeline::new(&config, &client, &store, &sink, &NoPrompts, &runner);

    let outcome = pipeline
        .run(QueryRequest {
            subject: "chat",
            scenario: "Neutral",
            question: "ping",
            params: SamplingParams::from_config(&config.query),
            options: QueryOptions {
                retry: true,
                ..QueryOptions::default()
            },
        })
        .await
        .unwrap();

    assert_eq!(outcome.answer, "ok");
    assert_eq!(server.await.unwrap().len(), 2);
    let errors = sink.errors.lock().unwrap().clone();
    assert_eq!(errors[0], "Error: Too many requests. We will try again");
    assert!(errors.iter().any(|e| e.starts_with("Retrying again in")));
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn failure_without_retry_leaves_no_transcript() {
    let (base_url, server) =
        serve(vec![http_response("500 Internal Server Error", "boom")]).await;
    let dir = temp_dir("fail");
    let config = config_for(&base_url, dir.clone());
    let client = ApiClient::new(&config.api);
    let store = TranscriptStore::from_config(&config);
    let sink = CollectingSink::default();
    let runner = ShellRunner::from_config(&config.exec);
    let pipeline = QueryPipeline::new(&config, &client, &store, &sink, &NoPrompts, &runner);

    let err = pipeline
        .run(QueryRequest {
            subject: "chat",
            scenario: "Neutral",
            question: "ping",
            params: SamplingParams::from_config(&config.query),
            options: QueryOptions::default(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::RetryExhausted { attempts: 1, .. }), "got: {err}");
    assert!(err.to_string().contains("Please wait a few minutes"));
    server.await.unwrap();
    assert!(!dir.exists());
}
