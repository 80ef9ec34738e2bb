use crate::domain::{
    errors::DomainError,
    social::{
        comment::{Comment, NewComment},
        repository::CommentRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    #[instrument(skip(self, comment), fields(prompt_id = %comment.prompt_id))]
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, prompt_id, user_id, text) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, prompt_id, user_id, text, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(comment.prompt_id)
        .bind(comment.user_id)
        .bind(&comment.text)
        .fetch_one(&self.pool)
        .await?;
        debug!(comment_id = %row.id, "Comment stored");
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, Comment>(
            "SELECT id, prompt_id, user_id, text, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, Comment>(
            "SELECT id, prompt_id, user_id, text, created_at \
             FROM comments \
             WHERE prompt_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_author(&self, user_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, Comment>(
            "DELETE FROM comments WHERE user_id = $1 \
             RETURNING id, prompt_id, user_id, text, created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
