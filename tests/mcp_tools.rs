//! MCP tool handlers and their error mapping.

mod common;

use std::sync::Arc;

use common::{article, PipelineHarness};
use newscast::mcp::NewscastServer;
use newscast::services::noop_progress;
use rmcp::ServerHandler;

fn server(harness: &PipelineHarness) -> NewscastServer {
    NewscastServer::new(Arc::new(harness.pipeline()))
}

#[tokio::test]
async fn test_analyze_returns_report() {
    let harness = PipelineHarness::new(vec![article("A", "Shares gain on launch")]);

    let report = server(&harness)
        .handle_analyze("Acme", noop_progress())
        .await
        .unwrap();

    assert_eq!(report.company, "Acme");
    assert_eq!(report.comparative.sentiment_distribution.positive, 1);
}

#[tokio::test]
async fn test_analyze_without_articles_is_no_data() {
    let harness = PipelineHarness::new(vec![]);

    let err = server(&harness)
        .handle_analyze("Acme", noop_progress())
        .await
        .unwrap_err();

    assert_eq!(err.error_code, "NO_DATA");
}

#[tokio::test]
async fn test_blank_company_is_validation_error() {
    let harness = PipelineHarness::new(vec![]);

    let err = server(&harness)
        .handle_analyze("", noop_progress())
        .await
        .unwrap_err();

    assert_eq!(err.error_code, "VALIDATION_ERROR");
    assert_eq!(err.field.as_deref(), Some("company"));
}

#[tokio::test]
async fn test_speak_and_topics() {
    let harness = PipelineHarness::new(vec![]);
    let server = server(&harness);

    let speech = server.handle_speak("Hello", noop_progress()).await.unwrap();
    assert_eq!(speech.translated_text, "[hi] Hello");

    let topics = server.handle_extract_topics("Tesla stock rises after strong quarterly earnings.");
    assert_eq!(topics.topics, vec!["tesla", "stock", "rises"]);
}

#[test]
fn test_server_info_lists_tools() {
    let harness = PipelineHarness::new(vec![]);
    let info = server(&harness).get_info();

    assert_eq!(info.server_info.name, "newscast");
    let instructions = info.instructions.unwrap();
    assert!(instructions.contains("analyze_company_news"));
    assert!(instructions.contains("Hindi"));
}
