//! Integration tests for DataChat.
//!
//! These tests verify the end-to-end functionality of the system.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::routing::post;

use datachat::connector::api::{Container, ContainerConfig, Router};
use datachat::connector::api::controller::ChatController;
use datachat::{
    Commands, CsvDatasetSource, DatasetSource, LoadDatasetUseCase, MockChatClient, OllamaClient,
    OllamaConfig, Role, SendMessageUseCase,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/houses.csv")
}

fn mock_container(replies: Vec<&str>) -> Container {
    let config = ContainerConfig {
        dataset_path: fixture_path(),
        ollama: OllamaConfig::default(),
        mock_llm: true,
    };
    let client = Arc::new(MockChatClient::with_replies(
        replies.into_iter().map(String::from).collect(),
    ));
    let source = Arc::new(CsvDatasetSource::new(fixture_path()));
    Container::with_services(config, client, source)
}

#[tokio::test]
async fn test_fixture_loads_with_expected_shape() {
    let source = CsvDatasetSource::new(fixture_path());
    let dataset = source.load().expect("Failed to load fixture");

    assert_eq!(dataset.shape(), (8, 7));

    let sample = dataset.context_sample();
    assert!(sample.contains("Electronic City Phase II"));
    assert!(sample.contains("Kothanur"));
    assert!(!sample.contains("Whitefield"), "Only the first 5 rows are sampled");
}

#[tokio::test]
async fn test_missing_dataset_fails_startup() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let use_case = LoadDatasetUseCase::new(Arc::new(CsvDatasetSource::new(
        dir.path().join("nope.csv"),
    )));

    let err = use_case.initial_state().unwrap_err();
    assert!(err.is_dataset_load());
    assert!(err.to_string().starts_with("Failed to load dataset"));
}

#[tokio::test]
async fn test_end_to_end_question_over_http() {
    let app = axum::Router::new().route(
        "/api/generate",
        post(|| async { Body::from("{\"response\":\"42\"}\n{\"response\":\".5\"}\n") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    let mut state = LoadDatasetUseCase::new(Arc::new(CsvDatasetSource::new(fixture_path())))
        .initial_state()
        .expect("Failed to load dataset");
    assert!(state.dataset().shape().0 >= 5);

    let client = OllamaClient::new(
        OllamaConfig::default()
            .with_url(format!("http://{}/api/generate", addr))
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("Failed to build client");
    let use_case = SendMessageUseCase::new(Arc::new(client));

    let reply = use_case
        .execute(&mut state, "What is the average price?")
        .await
        .expect("Send failed");

    assert_eq!(reply.content(), "42.5");
    let messages = state.active().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].content(), "What is the average price?");
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].content(), "42.5");
}

#[tokio::test]
async fn test_chat_loop_archives_and_reopens() {
    let container = mock_container(vec!["42.5", "two"]);
    let mut state = container
        .load_dataset_use_case()
        .initial_state()
        .expect("Failed to load dataset");

    let input: &[u8] = b"What is the average price?\n/new\n/chats\nsecond question\n/open 1\n/open 9\n/bogus\n/quit\nnever read\n";
    let mut output = Vec::new();

    ChatController::new(&container)
        .run(&mut state, input, &mut output)
        .await
        .expect("Chat loop failed");

    let output = String::from_utf8(output).expect("Output is not UTF-8");
    assert!(output.contains("[assistant] 42.5"));
    assert!(output.contains("Started a new chat."));
    assert!(output.contains("Chat 1: What is the average price? (2 messages)"));
    assert!(output.contains("[assistant] two"));
    assert!(output.contains("Not found: No chat numbered 9"));
    assert!(output.contains("unknown command '/bogus'"));
    assert!(!output.contains("never read"));

    // "/open 1" archived the second conversation and resumed a copy of the first.
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.history()[1].messages()[0].content(), "second question");
    assert_eq!(state.active().len(), 2);
    assert_eq!(state.active().messages()[1].content(), "42.5");
}

#[tokio::test]
async fn test_chat_loop_ends_at_end_of_input() {
    let container = mock_container(vec![]);
    let mut state = container
        .load_dataset_use_case()
        .initial_state()
        .expect("Failed to load dataset");

    let input: &[u8] = b"\n   \n/chats\n";
    let mut output = Vec::new();

    ChatController::new(&container)
        .run(&mut state, input, &mut output)
        .await
        .expect("Chat loop failed");

    let output = String::from_utf8(output).expect("Output is not UTF-8");
    assert!(output.contains("No chats yet..."));
    assert!(state.active().is_empty());
}

#[tokio::test]
async fn test_router_ask_and_sample() {
    let container = mock_container(vec!["about 42"]);
    let mut state = container
        .load_dataset_use_case()
        .initial_state()
        .expect("Failed to load dataset");
    let router = Router::new(&container);

    let answer = router
        .route(
            Commands::Ask {
                question: "What is the average price?".to_string(),
            },
            &mut state,
        )
        .await
        .expect("Ask failed");
    assert_eq!(answer, "about 42");

    let sample = router
        .route(Commands::Sample, &mut state)
        .await
        .expect("Sample failed");
    assert!(sample.contains("(8 rows, 7 columns)"));
    assert!(sample.contains("Chikka Tirupathi"));

    let blank = router
        .route(
            Commands::Ask {
                question: "  ".to_string(),
            },
            &mut state,
        )
        .await;
    assert!(blank.is_err());
}
