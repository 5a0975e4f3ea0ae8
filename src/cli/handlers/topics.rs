//! `newscast topics <text>`; runs locally, no providers involved.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output_json, print_hint, print_kv, OutputMode};
use crate::services::get_topics;

#[derive(Debug, Serialize)]
struct TopicsOutput {
    topics: Vec<String>,
}

pub fn handle_topics(text: &str, mode: OutputMode) -> Result<()> {
    let topics = get_topics(text);

    match mode {
        OutputMode::Json => output_json(&TopicsOutput { topics }),
        OutputMode::Human => {
            if topics.is_empty() {
                print_hint("No topics found (text is empty or only stopwords).");
            } else {
                for (i, topic) in topics.iter().enumerate() {
                    print_kv(&(i + 1).to_string(), topic);
                }
            }
        }
    }
    Ok(())
}
