pub mod http;
pub mod text;

pub use text::{chunk_on_words, require_non_blank, truncate_chars};
