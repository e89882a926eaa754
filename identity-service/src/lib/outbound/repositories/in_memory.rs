use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::authentication::errors::RefreshTokenIdStoreError;
use crate::domain::authentication::models::RefreshTokenId;
use crate::domain::authentication::ports::RefreshTokenIdStore;
use crate::domain::user::models::UserId;

/// Process-local refresh token identifier store.
///
/// Identifiers are lost on restart, which signs every user out.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenIdStore {
    identifiers: RwLock<HashMap<UserId, RefreshTokenId>>,
}

impl InMemoryRefreshTokenIdStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current identifier of a user, if any.
    pub async fn current(&self, user_id: &UserId) -> Option<RefreshTokenId> {
        self.identifiers.read().await.get(user_id).copied()
    }

    pub async fn is_empty(&self) -> bool {
        self.identifiers.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenIdStore for InMemoryRefreshTokenIdStore {
    async fn record_identifier(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<(), RefreshTokenIdStoreError> {
        self.identifiers.write().await.insert(*user_id, *token_id);
        Ok(())
    }

    async fn is_current_identifier(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshTokenIdStoreError> {
        Ok(self.identifiers.read().await.get(user_id) == Some(token_id))
    }

    async fn clear(&self, user_id: &UserId) -> Result<(), RefreshTokenIdStoreError> {
        self.identifiers.write().await.remove(user_id);
        Ok(())
    }

    async fn take_if_current(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshTokenIdStoreError> {
        let mut identifiers = self.identifiers.write().await;

        if identifiers.get(user_id) == Some(token_id) {
            identifiers.remove(user_id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
