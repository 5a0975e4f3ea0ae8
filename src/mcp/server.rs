use crate::mcp::progress::make_mcp_progress;
use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::{Json, Parameters},
    model::*,
    tool, tool_handler, tool_router, Peer, RoleServer, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::instrument;

use crate::mcp::error::ToolError;
use crate::models::{NewsReport, SpeechResponse};
use crate::services::progress::ProgressReporter;
use crate::services::{get_topics, NewsPipeline};

/// Input for analyze_company_news tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeCompanyInput {
    /// Company name to search news for (e.g., "Tesla")
    pub company: String,
}

/// Input for speak_text tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SpeakTextInput {
    /// English text to translate and synthesize
    pub text: String,
}

/// Input for extract_topics tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractTopicsInput {
    /// Text to pull keywords from
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}

/// MCP server exposing the news pipeline.
#[derive(Clone)]
pub struct NewscastServer {
    pipeline: Arc<NewsPipeline>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NewscastServer {
    pub fn new(pipeline: Arc<NewsPipeline>) -> Self {
        Self {
            pipeline,
            tool_router: Self::tool_router(),
        }
    }

    pub fn from_context(ctx: &crate::init::AppContext) -> Self {
        Self::new(ctx.pipeline.clone())
    }

    #[tool(
        description = "Fetch recent news about a company and return per-article sentiment and topics, a comparative analysis, an English and translated summary, and a speech file for the summary."
    )]
    #[instrument(name = "mcp.analyze_company_news", skip_all)]
    pub async fn analyze_company_news(
        &self,
        request: Parameters<AnalyzeCompanyInput>,
        meta: Meta,
        client: Peer<RoleServer>,
    ) -> Result<Json<NewsReport>, ToolError> {
        let progress = make_mcp_progress(&meta, &client);
        self.handle_analyze(&request.0.company, progress)
            .await
            .map(Json)
    }

    #[tool(
        description = "Translate English text into the configured target language and synthesize speech for it. Audio failures are reported in the message, not as errors."
    )]
    #[instrument(name = "mcp.speak_text", skip_all)]
    pub async fn speak_text(
        &self,
        request: Parameters<SpeakTextInput>,
        meta: Meta,
        client: Peer<RoleServer>,
    ) -> Result<Json<SpeechResponse>, ToolError> {
        let progress = make_mcp_progress(&meta, &client);
        self.handle_speak(&request.0.text, progress).await.map(Json)
    }

    #[tool(description = "Return up to 3 keywords of a text, most frequent first, stopwords removed.")]
    #[instrument(name = "mcp.extract_topics", skip_all)]
    pub async fn extract_topics(
        &self,
        request: Parameters<ExtractTopicsInput>,
    ) -> Result<Json<TopicsResponse>, ToolError> {
        Ok(Json(self.handle_extract_topics(&request.0.text)))
    }
}

impl NewscastServer {
    pub async fn handle_analyze(
        &self,
        company: &str,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<NewsReport, ToolError> {
        self.pipeline
            .analyze_company(company, progress)
            .await
            .map_err(ToolError::from)
    }

    pub async fn handle_speak(
        &self,
        text: &str,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<SpeechResponse, ToolError> {
        self.pipeline
            .speak_text(text, progress)
            .await
            .map_err(ToolError::from)
    }

    pub fn handle_extract_topics(&self, text: &str) -> TopicsResponse {
        TopicsResponse {
            topics: get_topics(text),
        }
    }
}

#[tool_handler]
impl ServerHandler for NewscastServer {
    fn get_info(&self) -> ServerInfo {
        let language = self.pipeline.target_language();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "newscast".to_string(),
                title: Some("Newscast Company News Sentiment".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                r#"# Newscast

Company news sentiment, summarized, translated to {} ({}) and spoken.

## Tools
- analyze_company_news: full report for a company name
- speak_text: translate and synthesize free text
- extract_topics: keywords of a text, no network calls

## Errors
- VALIDATION_ERROR: empty company or text
- NO_DATA: no articles, or none with usable text; try another name
- INTERNAL_ERROR: provider failure, retry

Missing audio or an untranslated summary is a degraded success, not an error.
"#,
                language.name(),
                language.code()
            )),
        }
    }
}

/// Why the stdio server stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    ClientClosed,
    Signal,
}

/// Wait for the service to finish or the signal to fire, whichever comes first.
///
/// Dropping `waiting` on signal drops the running service, which cancels it.
async fn wait_for_exit<W, T, E, S>(waiting: W, signal: S) -> anyhow::Result<ExitReason>
where
    W: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
    S: Future,
{
    tokio::select! {
        result = waiting => {
            result?;
            Ok(ExitReason::ClientClosed)
        }
        _ = signal => Ok(ExitReason::Signal),
    }
}

/// Run the MCP server on stdio until the client disconnects or ctrl-c.
pub async fn run_mcp_server(ctx: crate::init::AppContext) -> anyhow::Result<()> {
    let server = NewscastServer::from_context(&ctx);

    tracing::info!("Starting Newscast MCP server v{}", env!("CARGO_PKG_VERSION"));

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;
    tracing::info!("MCP server listening on stdio (3 tools)");

    let signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let result = wait_for_exit(service.waiting(), signal).await;

    match &result {
        Ok(ExitReason::Signal) => tracing::info!("Shutdown signal received"),
        Ok(ExitReason::ClientClosed) => tracing::info!("MCP client disconnected"),
        Err(e) => tracing::warn!("MCP service ended with error: {:#}", e),
    }

    tracing::info!("MCP server shutting down");
    ctx.shutdown().await;

    result.map(|_| ())
}
