/// Authentication module
///
/// Password hashing, session token issuance/verification, refresh token
/// generation and Authorization header parsing. Nothing in here logs or
/// touches storage.

mod claims;
mod header;
mod jwt;
mod password;
mod refresh_token;

pub use claims::Claims;
pub use claims::ISSUER;
pub use header::extract_api_key;
pub use header::extract_bearer_token;
pub use jwt::issue_session_token;
pub use jwt::verify_session_token;
pub use password::hash_password;
pub use password::verify_password;
pub use refresh_token::generate_refresh_token;
pub use refresh_token::REFRESH_TOKEN_BYTES;
