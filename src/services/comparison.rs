//! Cross-article comparison: coverage contrasts and topic overlap.

use std::collections::{HashMap, HashSet};

use crate::models::{
    ComparativeScore, CoverageDifference, EnrichedArticle, Sentiment, SentimentCounts, TopicOverlap,
};

/// Assemble the comparative block of a report.
pub fn build_comparative(counts: SentimentCounts, articles: &[EnrichedArticle]) -> ComparativeScore {
    ComparativeScore {
        sentiment_distribution: counts,
        coverage_differences: coverage_differences(articles),
        topic_overlap: topic_overlap(articles),
    }
}

/// Topics shared by two or more articles, plus those only the first and
/// second article mention.
pub fn topic_overlap(articles: &[EnrichedArticle]) -> TopicOverlap {
    // topic -> number of articles mentioning it
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for article in articles {
        let mut seen_here: HashSet<&str> = HashSet::new();
        for topic in article.topics.iter().map(String::as_str) {
            if !seen_here.insert(topic) {
                continue;
            }
            let count = doc_freq.entry(topic).or_insert(0);
            if *count == 0 {
                first_seen.push(topic);
            }
            *count += 1;
        }
    }

    let common_topics = first_seen
        .iter()
        .filter(|t| doc_freq.get(*t).copied().unwrap_or(0) >= 2)
        .map(|t| t.to_string())
        .collect();

    let unique_to = |idx: usize| -> Vec<String> {
        articles
            .get(idx)
            .map(|a| {
                a.topics
                    .iter()
                    .filter(|t| doc_freq.get(t.as_str()).copied().unwrap_or(0) == 1)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    };

    TopicOverlap {
        common_topics,
        unique_topics_first: unique_to(0),
        unique_topics_second: unique_to(1),
    }
}

/// One entry per adjacent pair whose sentiments differ, or a single
/// "consistent" entry when they never do.
pub fn coverage_differences(articles: &[EnrichedArticle]) -> Vec<CoverageDifference> {
    if articles.is_empty() {
        return vec![];
    }

    let differences: Vec<CoverageDifference> = articles
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].sentiment != pair[1].sentiment)
        .map(|(i, pair)| CoverageDifference {
            comparison: format!(
                "Article {} ('{}') is {} while Article {} ('{}') is {}.",
                i + 1,
                pair[0].display_title(),
                pair[0].sentiment,
                i + 2,
                pair[1].display_title(),
                pair[1].sentiment
            ),
            impact: impact_of(pair[0].sentiment, pair[1].sentiment).to_string(),
        })
        .collect();

    if !differences.is_empty() {
        return differences;
    }

    let sentiment = articles[0].sentiment;
    let comparison = if articles.len() == 1 {
        format!("Only one article was analyzed and it is {}.", sentiment)
    } else {
        format!("All {} articles are {}.", articles.len(), sentiment)
    };
    vec![CoverageDifference {
        comparison,
        impact: "Coverage is consistent across sources.".to_string(),
    }]
}

fn impact_of(from: Sentiment, to: Sentiment) -> &'static str {
    use Sentiment::*;
    match (from, to) {
        (Positive, Negative) => {
            "Coverage turns critical, which may weaken confidence built by earlier reports."
        }
        (Negative, Positive) => "Coverage turns favourable, offsetting earlier concerns.",
        (Positive, Neutral) | (Neutral, Positive) => {
            "A neutral report tempers the positive coverage."
        }
        (Negative, Neutral) | (Neutral, Negative) => {
            "A neutral report softens the negative coverage."
        }
        _ => "Coverage is consistent across sources.",
    }
}
