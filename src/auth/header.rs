/// Authorization Header Parsing
///
/// Pulls credentials out of the raw `Authorization` header value. The scheme
/// prefix is trimmed literally: a value without the prefix is returned as is.

use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// # Errors
/// Returns `NoBearerToken` if the header is absent, empty, or nothing
/// follows the prefix
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    strip_scheme(header, BEARER_PREFIX).ok_or(AuthError::NoBearerToken)
}

/// Extract the key from an `Authorization: ApiKey <key>` header
///
/// # Errors
/// Returns `NoApiKey` under the same conditions as [`extract_bearer_token`]
pub fn extract_api_key(header: Option<&str>) -> Result<&str, AuthError> {
    strip_scheme(header, API_KEY_PREFIX).ok_or(AuthError::NoApiKey)
}

fn strip_scheme<'a>(header: Option<&'a str>, prefix: &str) -> Option<&'a str> {
    let value = header.filter(|h| !h.is_empty())?;
    let credential = value.strip_prefix(prefix).unwrap_or(value);

    (!credential.is_empty()).then_some(credential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer ABC123")), Ok("ABC123"));
    }

    #[test]
    fn test_bearer_without_token() {
        assert_eq!(extract_bearer_token(Some("Bearer ")), Err(AuthError::NoBearerToken));
    }

    #[test]
    fn test_absent_or_empty_header() {
        assert_eq!(extract_bearer_token(None), Err(AuthError::NoBearerToken));
        assert_eq!(extract_bearer_token(Some("")), Err(AuthError::NoBearerToken));
    }

    #[test]
    fn test_internal_whitespace_kept() {
        assert_eq!(extract_bearer_token(Some("Bearer  a b ")), Ok(" a b "));
    }

    #[test]
    fn test_missing_prefix_returns_value() {
        assert_eq!(extract_bearer_token(Some("ABC123")), Ok("ABC123"));
    }

    #[test]
    fn test_api_key() {
        assert_eq!(extract_api_key(Some("ApiKey f271c81ff7084ee5b99a5091b42d486e")),
            Ok("f271c81ff7084ee5b99a5091b42d486e"));
        assert_eq!(extract_api_key(Some("ApiKey ")), Err(AuthError::NoApiKey));
        assert_eq!(extract_api_key(None), Err(AuthError::NoApiKey));
    }
}
