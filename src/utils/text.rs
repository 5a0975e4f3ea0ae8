//! Input validation and text trimming helpers.
//!
//! Request inputs are checked here before any provider is contacted, and
//! classifier input is cut to the model's limit on a char boundary.

use crate::NewscastError;

/// Reject empty or whitespace-only input, returning the trimmed value.
///
/// `field` names the input in the error message (e.g. "Company name").
pub fn require_non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, NewscastError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NewscastError::Validation(format!(
            "{} cannot be empty.",
            field
        )));
    }
    Ok(trimmed)
}

/// Keep at most `max_chars` characters of `text`.
///
/// Counts chars, not bytes, so multi-byte text is never split mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Split `text` into pieces of at most `max_chars` characters, breaking on
/// whitespace where possible.
///
/// Words longer than the limit are hard-split. Empty pieces are never emitted.
pub fn chunk_on_words(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        // Hard-split oversized words
        while word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let head = truncate_chars(word, max_chars);
            chunks.push(head.to_string());
            word = &word[head.len()..];
            word_len -= max_chars;
        }

        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
