use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarity of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Map a classifier label onto a sentiment.
    ///
    /// Matches `positive`/`negative` case-insensitively (SST-2 style
    /// `POSITIVE`, cardiffnlp style `positive`); anything else is neutral.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("positive") {
            Sentiment::Positive
        } else if label.eq_ignore_ascii_case("negative") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally of sentiments across a report.
///
/// All three keys are always serialized, zero when unseen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentCounts {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// The sentiment holding a strict majority of the tally, if any.
    pub fn majority(&self) -> Option<Sentiment> {
        let total = self.total();
        Sentiment::ALL
            .into_iter()
            .find(|s| self.get(*s) * 2 > total)
    }
}

impl FromIterator<Sentiment> for SentimentCounts {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut counts = SentimentCounts::new();
        for sentiment in iter {
            counts.record(sentiment);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_label() {
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("NEGATIVE"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("neutral"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("LABEL_7"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label(""), Sentiment::Neutral);
    }

    #[test]
    fn test_counts_serialize_all_keys() {
        let counts = SentimentCounts::new();
        assert_eq!(
            serde_json::to_value(counts).expect("serialize"),
            json!({"Positive": 0, "Negative": 0, "Neutral": 0})
        );
    }

    #[test]
    fn test_counts_record_and_total() {
        let counts: SentimentCounts = [
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Neutral,
        ]
        .into_iter()
        .collect();
        assert_eq!(counts.positive, 2);
        assert_eq!(counts.negative, 0);
        assert_eq!(counts.neutral, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_majority_requires_more_than_half() {
        let counts: SentimentCounts = [Sentiment::Negative, Sentiment::Negative, Sentiment::Positive]
            .into_iter()
            .collect();
        assert_eq!(counts.majority(), Some(Sentiment::Negative));

        let tied: SentimentCounts = [Sentiment::Negative, Sentiment::Positive].into_iter().collect();
        assert_eq!(tied.majority(), None);

        assert_eq!(SentimentCounts::new().majority(), None);
    }
}
