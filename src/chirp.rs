/// Chirp body validation and profanity redaction
///
/// Callers check the length of the raw body before redacting it; a body
/// that is too long is rejected without ever being redacted.

use crate::error::ValidationError;

/// Maximum chirp length in characters
pub const MAX_CHIRP_LENGTH: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const REDACTED: &str = "****";

/// Reject bodies longer than [`MAX_CHIRP_LENGTH`] characters
pub fn validate_chirp_length(body: &str) -> Result<(), ValidationError> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong("chirp".to_string(), MAX_CHIRP_LENGTH));
    }
    Ok(())
}

/// Replace denylisted words with `****`
///
/// Only whole whitespace-separated tokens match, case-insensitively, so
/// `kerfuffle!` is left alone. Runs of whitespace come out as single spaces.
pub fn redact_profanity(body: &str) -> String {
    body.split_whitespace()
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                REDACTED
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length check followed by redaction
pub fn sanitize_chirp(body: &str) -> Result<String, ValidationError> {
    validate_chirp_length(body)?;
    Ok(redact_profanity(body))
}
