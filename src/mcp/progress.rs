//! Pipeline progress forwarded as MCP progress notifications.
//!
//! Only created when the client sent a progress token with the tool call.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Meta, ProgressNotificationParam, ProgressToken};
use rmcp::{Peer, RoleServer};

use crate::services::progress::{noop_progress, ProgressReporter, Stage};

pub struct McpProgressReporter {
    client: Peer<RoleServer>,
    token: ProgressToken,
}

impl McpProgressReporter {
    pub fn new(client: Peer<RoleServer>, token: ProgressToken) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl ProgressReporter for McpProgressReporter {
    async fn report(&self, current: f64, total: f64, message: Option<String>) {
        let sent = self
            .client
            .notify_progress(ProgressNotificationParam {
                progress_token: self.token.clone(),
                progress: current,
                total: Some(total),
                message,
            })
            .await;
        if let Err(e) = sent {
            tracing::debug!("Dropping progress notification: {}", e);
        }
    }

    /// Stages are sent as whole steps ("2 of 5") rather than fractions.
    async fn stage(&self, stage: Stage) {
        let total = Stage::ALL.len() as f64;
        let current = (stage.ordinal() - 1) as f64;
        let message = format!("[{}/{}] {}", stage.ordinal(), Stage::ALL.len(), stage.label());
        self.report(current, total, Some(message)).await;
    }

    async fn finish(&self, message: &str) {
        let total = Stage::ALL.len() as f64;
        self.report(total, total, Some(message.to_string())).await;
    }
}

/// Reporter for a tool call: MCP notifications when a token is present, noop otherwise.
pub fn make_mcp_progress(meta: &Meta, client: &Peer<RoleServer>) -> Arc<dyn ProgressReporter> {
    match meta.get_progress_token() {
        Some(token) => Arc::new(McpProgressReporter::new(client.clone(), token.clone())),
        None => noop_progress(),
    }
}
