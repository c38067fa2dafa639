//! Auth service: signup and signin over an injected user store and token signer.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::{TokenPair, TokenSigner};
use crate::auth::password;
use crate::db::UserStore;
use crate::error::{AppError, AppResult};

/// Orchestrates the credential store, password hasher, and token signer.
/// Stateless; every call is an independent transaction against the store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, signer: TokenSigner) -> Self {
        Self { store, signer }
    }

    /// Create a user and issue its first token pair. An already-registered
    /// email fails with `CredentialsTaken`; other store failures propagate.
    pub async fn sign_up(&self, email: &str, nickname: &str, password: &str) -> AppResult<TokenPair> {
        let hash = password::hash(password)?;
        let user = self.store.create(email, nickname, &hash).await?;
        let tokens = self.signer.issue_pair(user.id, &user.email)?;
        // Not in the same transaction as the insert: a failure here leaves the
        // user with a NULL refresh hash and surfaces to the caller.
        self.update_rt_hash(user.id, &tokens.refresh_token).await?;
        info!(user_id = %user.id, "user signed up");
        Ok(tokens)
    }

    /// Verify credentials and issue a fresh token pair.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AppError::AccessDenied)?;
        if !password::verify(password, &user.hash)? {
            return Err(AppError::InvalidPassword);
        }
        let tokens = self.signer.issue_pair(user.id, &user.email)?;
        self.update_rt_hash(user.id, &tokens.refresh_token).await?;
        info!(user_id = %user.id, "user signed in");
        Ok(tokens)
    }

    /// Persist a one-way hash of the refresh token onto the user record.
    pub async fn update_rt_hash(&self, user_id: Uuid, refresh_token: &str) -> AppResult<()> {
        let hashed = password::hash(refresh_token)?;
        self.store.update_rt_hash(user_id, &hashed).await
    }
}
