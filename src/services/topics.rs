//! Keyword extraction by stopword-filtered term frequency.
//!
//! Topics are the most frequent content words of an article's summary text.
//! Ties keep the order in which the words first appeared, so the output is
//! deterministic for a given input.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Maximum number of topics returned per text.
pub const MAX_TOPICS: usize = 3;

/// English stopwords (NLTK list).
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Topic extraction strategy. Implementations must be pure: same text, same topics.
pub trait TopicExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Default extractor backed by [`get_topics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyTopicExtractor;

impl TopicExtractor for FrequencyTopicExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        get_topics(text)
    }
}

/// Split text into lowercase alphanumeric word tokens.
///
/// Surrounding punctuation is stripped and possessive or contracted suffixes
/// are cut at the apostrophe ("Tesla's" -> "tesla"). Chunks that still hold
/// inner punctuation ("u.s", "e-commerce") are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|chunk| {
            let trimmed = chunk.trim_matches(|c: char| !c.is_alphanumeric());
            let stem = trimmed
                .split(['\'', '\u{2019}'])
                .next()
                .unwrap_or_default();
            if stem.is_empty() || !stem.chars().all(char::is_alphanumeric) {
                return None;
            }
            Some(stem.to_lowercase())
        })
        .collect()
}

/// Up to [`MAX_TOPICS`] most frequent non-stopword tokens of `text`.
pub fn get_topics(text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        // Lowercasing can produce non-alphanumeric chars for a few scripts
        if is_stopword(&token) || !token.chars().all(char::is_alphanumeric) {
            continue;
        }
        match index.get(&token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(token, _)| token)
        .collect()
}
