/// Refresh Token Generation
///
/// Refresh tokens are opaque: 32 bytes from the OS random source rendered as
/// lowercase hex. Persistence and the validity rule live with the stored
/// [`RefreshToken`](crate::domain::RefreshToken) record.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::EntropyError;

/// Number of random bytes in a refresh token
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a new cryptographically secure refresh token
///
/// # Errors
/// Returns `EntropyError` if the OS random source cannot be read
pub fn generate_refresh_token() -> Result<String, EntropyError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| EntropyError(e.to_string()))?;

    Ok(hex::encode(bytes))
}
