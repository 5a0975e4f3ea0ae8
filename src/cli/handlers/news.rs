//! `newscast news <company>`

use anyhow::Result;

use crate::cli::output::{
    join_or_dash, output_json, print_header, print_hint, print_kv, print_section, print_success,
    print_table, print_warning, sentiment_colored, OutputMode,
};
use crate::cli::progress::SpinnerProgress;
use crate::init::AppContext;
use crate::models::{EnrichedArticle, NewsReport};
use crate::services::Language;

pub async fn handle_news(ctx: &AppContext, company: &str, mode: OutputMode) -> Result<()> {
    let spinner = SpinnerProgress::start("Starting");
    let result = ctx.pipeline.analyze_company(company, spinner.clone()).await;
    spinner.clear();
    let report = result?;

    match mode {
        OutputMode::Json => output_json(&report),
        OutputMode::Human => print_report(&report),
    }
    Ok(())
}

/// Provider name from the `source` metadata object, if present.
fn source_name(article: &EnrichedArticle) -> String {
    article
        .article
        .metadata
        .get("source")
        .and_then(|s| s.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("-")
        .to_string()
}

fn print_report(report: &NewsReport) {
    print_header(&format!("News sentiment for {}", report.company));

    let rows = report
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            vec![
                (i + 1).to_string(),
                article.display_title().to_string(),
                sentiment_colored(article.sentiment).to_string(),
                join_or_dash(&article.topics),
                source_name(article),
            ]
        })
        .collect();
    print_table(&["#", "Title", "Sentiment", "Topics", "Source"], rows);

    let distribution = &report.comparative.sentiment_distribution;
    print_section("Sentiment Distribution", "");
    print_kv("Positive", &distribution.positive.to_string());
    print_kv("Negative", &distribution.negative.to_string());
    print_kv("Neutral", &distribution.neutral.to_string());

    let differences = report
        .comparative
        .coverage_differences
        .iter()
        .map(|d| format!("  - {}\n    {}", d.comparison, d.impact))
        .collect::<Vec<_>>()
        .join("\n");
    print_section("Coverage Differences", &differences);

    let overlap = &report.comparative.topic_overlap;
    print_section("Topic Overlap", "");
    print_kv("Common", &join_or_dash(&overlap.common_topics));
    print_kv("Only in article 1", &join_or_dash(&overlap.unique_topics_first));
    print_kv("Only in article 2", &join_or_dash(&overlap.unique_topics_second));

    print_section("Summary (English)", &report.summary_english);
    let language = Language::new(&report.target_language);
    print_section(&format!("Summary ({})", language.name()), &report.summary_translated);

    println!();
    match &report.audio_file {
        Some(path) => print_success(&format!("{} {}", report.audio, path)),
        None => {
            print_warning(&report.audio);
            print_hint("Audio is skipped with --no-audio or when the speech provider is unreachable.");
        }
    }
}
