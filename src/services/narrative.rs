use crate::models::{EnrichedArticle, Sentiment, SentimentCounts};
use crate::NewscastError;

/// Overall tone word for a set of articles.
///
/// A sentiment holding a strict majority names the tone, otherwise "mixed".
pub fn overall_tone(counts: &SentimentCounts) -> &'static str {
    match counts.majority() {
        Some(Sentiment::Positive) => "positive",
        Some(Sentiment::Negative) => "negative",
        Some(Sentiment::Neutral) => "neutral",
        None => "mixed",
    }
}

/// One-sentence summary naming the tone and every headline.
///
/// Fails with [`NewscastError::NoUsableArticles`] on an empty list; there is
/// nothing meaningful to narrate.
pub fn build_narrative(company: &str, articles: &[EnrichedArticle]) -> Result<String, NewscastError> {
    if articles.is_empty() {
        return Err(NewscastError::NoUsableArticles {
            company: company.to_string(),
            fetched: 0,
        });
    }

    let counts: SentimentCounts = articles.iter().map(|a| a.sentiment).collect();
    let headlines = articles
        .iter()
        .map(|a| a.display_title())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "{} has a {} news sentiment. The headlines are: {}",
        company,
        overall_tone(&counts),
        headlines
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawArticle;

    fn article(title: Option<&str>, sentiment: Sentiment) -> EnrichedArticle {
        EnrichedArticle {
            article: RawArticle::new(title, Some("desc"), None),
            sentiment,
            topics: vec![],
        }
    }

    #[test]
    fn test_mixed_narrative() {
        let articles = vec![
            article(Some("Tesla rises"), Sentiment::Positive),
            article(Some("Tesla falls"), Sentiment::Negative),
        ];
        assert_eq!(
            build_narrative("Tesla", &articles).unwrap(),
            "Tesla has a mixed news sentiment. The headlines are: Tesla rises, Tesla falls"
        );
    }

    #[test]
    fn test_majority_tone() {
        let articles = vec![
            article(Some("A"), Sentiment::Negative),
            article(Some("B"), Sentiment::Negative),
            article(Some("C"), Sentiment::Neutral),
        ];
        let narrative = build_narrative("Acme", &articles).unwrap();
        assert!(narrative.starts_with("Acme has a negative news sentiment."));
    }

    #[test]
    fn test_missing_title_placeholder() {
        let articles = vec![
            article(None, Sentiment::Neutral),
            article(Some("  "), Sentiment::Neutral),
        ];
        assert_eq!(
            build_narrative("Acme", &articles).unwrap(),
            "Acme has a neutral news sentiment. The headlines are: No Title, No Title"
        );
    }

    #[test]
    fn test_empty_list_is_no_data() {
        let err = build_narrative("Acme", &[]).unwrap_err();
        assert!(err.is_no_data());
    }
}
