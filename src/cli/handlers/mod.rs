pub mod news;
pub mod topics;
pub mod tts;
