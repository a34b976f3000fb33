//! Completion cleanup for token-limit truncation
//!
//! Completions cut off at the token limit carry partial sentences at either
//! end. Dot-split candidates that fail simple shape checks (uppercase start,
//! alphanumeric end) are treated as truncated fragments and removed, which
//! avoids a second model call just to tidy the text.

use crate::{Error, Result};

/// Remove likely-truncated leading/trailing sentence fragments from a raw
/// completion.
///
/// Steps, applied in order:
/// 1. Split on `.` into candidate sentences; a single candidate passes
///    through untouched (apart from step 4).
/// 2. If the first candidate does not start with an uppercase letter or does
///    not end with an alphanumeric character, drop it (and its separator)
///    from the front.
/// 3. If the last candidate is non-empty and does not end with an
///    alphanumeric character, drop it from the end. An empty last candidate
///    just means the text ended with `.` and is left for step 4.
/// 4. Trim trailing `.` and `”` characters.
///
/// A first candidate that is empty (raw text like `"."`) has no shape to
/// check and the completion is rejected as malformed.
pub fn sanitize_completion(raw: &str) -> Result<String> {
    let mut text = raw.trim().to_string();
    let candidates: Vec<String> = text.split('.').map(|s| s.trim().to_string()).collect();

    if candidates.len() > 1 {
        let first = &candidates[0];
        let (first_start, first_end) = match (first.chars().next(), first.chars().last()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(Error::Completion(
                    "completion starts with an empty sentence fragment".to_string(),
                ));
            }
        };

        if !first_start.is_uppercase() || !first_end.is_alphanumeric() {
            if let Some(dot) = text.find('.') {
                text = text[dot + 1..].trim().to_string();
            }
        }

        let last = &candidates[candidates.len() - 1];
        if let Some(last_end) = last.chars().last() {
            if !last_end.is_alphanumeric() && text.ends_with(last.as_str()) {
                text.truncate(text.len() - last.len());
                text = text.trim().to_string();
            }
        }
    }

    Ok(text
        .trim_end_matches(|c| c == '.' || c == '”')
        .trim_end()
        .to_string())
}
