/// Persistence for users, chirps and refresh tokens
///
/// Handlers only see the [`ChirpStore`] trait. [`PostgresStore`] backs the
/// real service; [`InMemoryStore`] runs without a database (tests, local
/// experiments).
///
/// Refresh tokens are never stored in plaintext: both stores key them by
/// their SHA-256 digest.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::{Chirp, RefreshToken, User};
use crate::error::DatabaseError;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[async_trait]
pub trait ChirpStore: Send + Sync {
    /// # Errors
    /// `UniqueConstraintViolation` if the email is taken
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, DatabaseError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// # Errors
    /// `NotFound` if the user does not exist
    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, DatabaseError>;

    /// # Errors
    /// `NotFound` if the user does not exist
    async fn upgrade_user_to_chirpy_red(&self, id: Uuid) -> Result<(), DatabaseError>;

    /// Deletes every user together with their chirps and refresh tokens
    async fn delete_all_users(&self) -> Result<(), DatabaseError>;

    async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, DatabaseError>;

    /// Chirps in ascending `created_at` order, optionally for one author only
    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, DatabaseError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, DatabaseError>;

    /// # Errors
    /// `NotFound` if the chirp does not exist
    async fn delete_chirp(&self, id: Uuid) -> Result<(), DatabaseError>;

    async fn create_refresh_token(&self, token: &RefreshToken) -> Result<(), DatabaseError>;

    /// Owner of `token` if it is known and still usable at `now`
    async fn get_user_from_refresh_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, DatabaseError>;

    /// # Errors
    /// `NotFound` if the token is unknown
    async fn revoke_refresh_token(&self, token: &str, now: DateTime<Utc>) -> Result<(), DatabaseError>;
}

/// SHA-256 digest of a refresh token, as stored
fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hashing() {
        let hash1 = hash_token("some-token");
        let hash2 = hash_token("some-token");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, "some-token");
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_token("other-token"));
    }
}
