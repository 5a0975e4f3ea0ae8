pub mod aggregation;
pub mod comparison;
pub mod narrative;
pub mod pipeline;
pub mod progress;
pub mod source;
pub mod speech;
pub mod topics;
pub mod translation;

pub use aggregation::{AggregationConfig, AggregationEngine};
pub use comparison::{build_comparative, coverage_differences, topic_overlap};
pub use narrative::{build_narrative, overall_tone};
pub use pipeline::{NewsPipeline, PipelineConfig};
pub use progress::{noop_progress, NoopProgressReporter, ProgressReporter, Stage};
pub use source::{ArticleSource, NewsApiSource};
pub use speech::{AudioArtifact, GoogleSpeechSynthesizer, NoopSpeechSynthesizer, SpeechSynthesizer};
pub use topics::{get_topics, FrequencyTopicExtractor, TopicExtractor};
pub use translation::{
    translate_or_original, translate_to_hindi, GoogleTranslator, Language, NoopTranslator,
    TranslationService,
};
