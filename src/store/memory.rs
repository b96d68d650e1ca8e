use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{hash_token, ChirpStore};
use crate::domain::{Chirp, RefreshToken, User};
use crate::error::DatabaseError;

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    /// Kept in insertion order, which is also `created_at` order
    chirps: Vec<Chirp>,
    /// Keyed by token digest
    refresh_tokens: HashMap<String, RefreshToken>,
}

/// [`ChirpStore`] held entirely in process memory
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DatabaseError> {
        self.state
            .read()
            .map_err(|_| DatabaseError::UnexpectedError("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DatabaseError> {
        self.state
            .write()
            .map_err(|_| DatabaseError::UnexpectedError("store lock poisoned".to_string()))
    }
}

fn email_taken(state: &State, email: &str, except: Option<Uuid>) -> bool {
    state
        .users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl ChirpStore for InMemoryStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, DatabaseError> {
        let mut state = self.write()?;
        if email_taken(&state, email, None) {
            return Err(DatabaseError::UniqueConstraintViolation(
                "Email already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let state = self.read()?;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, DatabaseError> {
        let mut state = self.write()?;
        if email_taken(&state, email, Some(id)) {
            return Err(DatabaseError::UniqueConstraintViolation(
                "Email already registered".to_string(),
            ));
        }

        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))?;
        user.email = email.to_string();
        user.hashed_password = hashed_password.to_string();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn upgrade_user_to_chirpy_red(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut state = self.write()?;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))?;
        user.is_chirpy_red = true;
        user.updated_at = Utc::now();

        Ok(())
    }

    async fn delete_all_users(&self) -> Result<(), DatabaseError> {
        let mut state = self.write()?;
        state.users.clear();
        state.chirps.clear();
        state.refresh_tokens.clear();

        Ok(())
    }

    async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, DatabaseError> {
        let mut state = self.write()?;
        if !state.users.contains_key(&user_id) {
            return Err(DatabaseError::NotFound("User not found".to_string()));
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        state.chirps.push(chirp.clone());

        Ok(chirp)
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, DatabaseError> {
        let state = self.read()?;
        Ok(state
            .chirps
            .iter()
            .filter(|c| author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect())
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, DatabaseError> {
        let state = self.read()?;
        Ok(state.chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut state = self.write()?;
        let position = state
            .chirps
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DatabaseError::NotFound("Chirp not found".to_string()))?;
        state.chirps.remove(position);

        Ok(())
    }

    async fn create_refresh_token(&self, token: &RefreshToken) -> Result<(), DatabaseError> {
        let mut state = self.write()?;
        if !state.users.contains_key(&token.user_id) {
            return Err(DatabaseError::NotFound("User not found".to_string()));
        }
        state
            .refresh_tokens
            .insert(hash_token(&token.token), token.clone());

        Ok(())
    }

    async fn get_user_from_refresh_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, DatabaseError> {
        let state = self.read()?;
        Ok(state
            .refresh_tokens
            .get(&hash_token(token))
            .filter(|t| t.is_usable(now))
            .map(|t| t.user_id))
    }

    async fn revoke_refresh_token(&self, token: &str, now: DateTime<Utc>) -> Result<(), DatabaseError> {
        let mut state = self.write()?;
        state
            .refresh_tokens
            .get_mut(&hash_token(token))
            .ok_or_else(|| DatabaseError::NotFound("Refresh token not found".to_string()))?
            .revoke(now);

        Ok(())
    }
}
