pub mod error;
pub mod progress;
pub mod server;

pub use error::ToolError;
pub use server::{
    AnalyzeCompanyInput, ExtractTopicsInput, NewscastServer, SpeakTextInput, TopicsResponse,
};
