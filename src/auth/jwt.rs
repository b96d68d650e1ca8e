/// Session Token Issuance and Verification
///
/// Session tokens are HS256-signed JWTs. Verification checks the signature
/// first and the expiry second, so a token that is both forged and expired
/// is reported as `InvalidSignature`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::{Claims, ISSUER};
use crate::error::TokenError;

/// Issue a session token for a user
///
/// # Arguments
/// * `user_id` - Subject of the token
/// * `secret` - HMAC signing secret
/// * `ttl` - How long the token stays valid
///
/// # Errors
/// Returns `MalformedToken` if the claims cannot be serialized
pub fn issue_session_token(
    user_id: Uuid,
    secret: &[u8],
    ttl: Duration,
) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, Utc::now(), ttl);
    sign_claims(&claims, secret)
}

fn sign_claims(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::MalformedToken(e.to_string()))
}

/// Verify a session token and return the user it was issued for
///
/// # Errors
/// - `InvalidSignature` if the token was not signed with `secret`
/// - `Expired` if the current time has reached the token's expiry
/// - `MalformedToken` if the token cannot be parsed, claims are missing,
///   the issuer is wrong or the subject is not a UUID
pub fn verify_session_token(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    // Expiry is checked below with an inclusive bound.
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::MalformedToken(e.to_string()),
        })?;

    if claims.is_expired_at(Utc::now()) {
        return Err(TokenError::Expired);
    }

    claims.user_id()
}
