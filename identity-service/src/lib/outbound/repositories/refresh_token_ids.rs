use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::authentication::errors::RefreshTokenIdStoreError;
use crate::domain::authentication::models::RefreshTokenId;
use crate::domain::authentication::ports::RefreshTokenIdStore;
use crate::domain::user::models::UserId;

/// Refresh token identifiers in the `refresh_token_ids` table, one row per user.
pub struct PostgresRefreshTokenIdStore {
    pool: PgPool,
}

impl PostgresRefreshTokenIdStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> RefreshTokenIdStoreError {
    RefreshTokenIdStoreError::DatabaseError(e.to_string())
}

#[async_trait]
impl RefreshTokenIdStore for PostgresRefreshTokenIdStore {
    async fn record_identifier(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<(), RefreshTokenIdStoreError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_token_ids (user_id, token_id, issued_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET token_id = EXCLUDED.token_id, issued_at = EXCLUDED.issued_at
            "#,
        )
        .bind(user_id.0)
        .bind(token_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn is_current_identifier(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshTokenIdStoreError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM refresh_token_ids
                WHERE user_id = $1 AND token_id = $2
            )
            "#,
        )
        .bind(user_id.0)
        .bind(token_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn clear(&self, user_id: &UserId) -> Result<(), RefreshTokenIdStoreError> {
        sqlx::query(
            r#"
            DELETE FROM refresh_token_ids
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn take_if_current(
        &self,
        user_id: &UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshTokenIdStoreError> {
        // A single conditional DELETE; concurrent callers cannot both see a row
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_token_ids
            WHERE user_id = $1 AND token_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(token_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() == 1)
    }
}
