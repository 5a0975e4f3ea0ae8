//! Progress reporting for the news pipeline.
//!
//! The pipeline announces each [`Stage`] through a [`ProgressReporter`]. MCP
//! tools forward these as progress notifications, the CLI drives a spinner,
//! and tests use [`NoopProgressReporter`].

use std::sync::Arc;

use async_trait::async_trait;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Enrich,
    Narrative,
    Translate,
    Speech,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Fetch,
        Stage::Enrich,
        Stage::Narrative,
        Stage::Translate,
        Stage::Speech,
    ];

    /// 1-based position within [`Stage::ALL`].
    pub fn ordinal(self) -> usize {
        Stage::ALL
            .iter()
            .position(|s| *s == self)
            .map(|i| i + 1)
            .unwrap_or(Stage::ALL.len())
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Fetch => "Fetching articles",
            Stage::Enrich => "Scoring sentiment and topics",
            Stage::Narrative => "Composing summary",
            Stage::Translate => "Translating summary",
            Stage::Speech => "Synthesizing speech",
        }
    }
}

/// Receives progress updates. `current` runs from 0.0 to `total`.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// Fire-and-forget; must never fail the caller.
    async fn report(&self, current: f64, total: f64, message: Option<String>);

    /// Report entry into a pipeline stage.
    async fn stage(&self, stage: Stage) {
        let current = (stage.ordinal() - 1) as f64 / Stage::ALL.len() as f64;
        self.report(current, 1.0, Some(stage.label().to_string())).await;
    }

    /// Report completion of the whole run.
    async fn finish(&self, message: &str) {
        self.report(1.0, 1.0, Some(message.to_string())).await;
    }
}

pub struct NoopProgressReporter;

#[async_trait]
impl ProgressReporter for NoopProgressReporter {
    async fn report(&self, _current: f64, _total: f64, _message: Option<String>) {}
}

pub fn noop_progress() -> Arc<dyn ProgressReporter> {
    Arc::new(NoopProgressReporter)
}
