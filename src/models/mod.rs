pub mod article;
pub mod report;
pub mod sentiment;

pub use article::{EnrichedArticle, RawArticle, NO_TITLE};
pub use report::{
    audio_ready_marker, AggregateReport, ComparativeScore, CoverageDifference, NewsReport,
    SpeechResponse, TopicOverlap, AUDIO_FAILED,
};
pub use sentiment::{Sentiment, SentimentCounts};
