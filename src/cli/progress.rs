use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use crate::services::progress::ProgressReporter;

/// Terminal spinner on stderr showing the current pipeline stage.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn start(message: &str) -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} [{elapsed}] {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message.to_string());
        Arc::new(Self { bar })
    }

    /// Remove the spinner from the terminal.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

#[async_trait]
impl ProgressReporter for SpinnerProgress {
    async fn report(&self, current: f64, total: f64, message: Option<String>) {
        let pct = if total > 0.0 {
            (current / total * 100.0).round() as u64
        } else {
            0
        };
        if let Some(message) = message {
            self.bar.set_message(format!("{} ({}%)", message, pct));
        }
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
