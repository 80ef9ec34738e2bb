use crate::domain::{
    errors::DomainError,
    prompt::{
        entity::{LikeOutcome, NewPrompt, Prompt},
        repository::PromptRepository,
        value_objects::PromptOutput,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const PROMPT_COLUMNS: &str = "id, title, tags, user_id, input, output, ai_model, likes, liked_by, \
     comments_count, upvotes, downvotes, created_at";

#[derive(FromRow)]
struct PromptRow {
    id: Uuid,
    title: String,
    tags: Vec<String>,
    user_id: Uuid,
    input: String,
    output: String,
    ai_model: String,
    likes: i32,
    liked_by: Vec<Uuid>,
    comments_count: i32,
    upvotes: i32,
    downvotes: i32,
    created_at: DateTime<Utc>,
}

impl PromptRow {
    fn into_prompt(self, separator: &str) -> Prompt {
        Prompt {
            id: self.id,
            title: self.title,
            tags: self.tags,
            user_id: self.user_id,
            input: self.input,
            output: PromptOutput::decode_legacy(&self.output, separator),
            ai_model: self.ai_model,
            likes: self.likes,
            liked_by: self.liked_by,
            comments_count: self.comments_count,
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            created_at: self.created_at,
        }
    }
}

/// Prompt storage. Outputs are persisted in the legacy single-string form
/// (`text<separator>url`) so older clients reading the table keep working.
pub struct SqlxPromptRepository {
    pub pool: PgPool,
    output_separator: String,
}

impl SqlxPromptRepository {
    pub fn new(pool: PgPool, output_separator: impl Into<String>) -> Self {
        info!("Initializing SqlxPromptRepository with connection pool");
        Self {
            pool,
            output_separator: output_separator.into(),
        }
    }

    fn map_rows(&self, rows: Vec<PromptRow>) -> Vec<Prompt> {
        rows.into_iter()
            .map(|r| r.into_prompt(&self.output_separator))
            .collect()
    }

    async fn bump_counter(&self, column: &str, prompt_id: Uuid) -> Result<i32, DomainError> {
        let value = sqlx::query_scalar::<_, i32>(&format!(
            "UPDATE prompts SET {col} = {col} + 1 WHERE id = $1 RETURNING {col}",
            col = column
        ))
        .bind(prompt_id)
        .fetch_optional(&self.pool)
        .await?;
        value.ok_or_else(|| DomainError::NotFound("Prompt not found".into()))
    }
}

#[async_trait]
impl PromptRepository for SqlxPromptRepository {
    #[instrument(skip(self, prompt), fields(user_id = %prompt.user_id))]
    async fn create(&self, prompt: &NewPrompt) -> Result<Prompt, DomainError> {
        let row = sqlx::query_as::<_, PromptRow>(&format!(
            "INSERT INTO prompts (id, title, tags, user_id, input, output, ai_model) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            PROMPT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&prompt.title)
        .bind(&prompt.tags)
        .bind(prompt.user_id)
        .bind(&prompt.input)
        .bind(prompt.output.encode_legacy(&self.output_separator))
        .bind(&prompt.ai_model)
        .fetch_one(&self.pool)
        .await?;
        debug!(prompt_id = %row.id, "Prompt created");
        Ok(row.into_prompt(&self.output_separator))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Prompt>, DomainError> {
        let row = sqlx::query_as::<_, PromptRow>(&format!(
            "SELECT {} FROM prompts WHERE id = $1",
            PROMPT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into_prompt(&self.output_separator)))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Prompt>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, PromptRow>(&format!(
            "SELECT {} FROM prompts WHERE id = ANY($1) ORDER BY created_at DESC, id DESC",
            PROMPT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(self.map_rows(rows))
    }

    async fn list_all(&self) -> Result<Vec<Prompt>, DomainError> {
        let rows = sqlx::query_as::<_, PromptRow>(&format!(
            "SELECT {} FROM prompts ORDER BY created_at DESC, id DESC",
            PROMPT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(self.map_rows(rows))
    }

    async fn list_by_author(&self, user_id: Uuid) -> Result<Vec<Prompt>, DomainError> {
        let rows = sqlx::query_as::<_, PromptRow>(&format!(
            "SELECT {} FROM prompts WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            PROMPT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(self.map_rows(rows))
    }

    #[instrument(skip(self), fields(terms = terms.len()))]
    async fn search(&self, terms: &[String]) -> Result<Vec<Prompt>, DomainError> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let patterns: Vec<String> = terms
            .iter()
            .map(|t| format!("%{}%", t.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")))
            .collect();
        let rows = sqlx::query_as::<_, PromptRow>(&format!(
            "SELECT {} FROM prompts \
             WHERE title ILIKE ANY($1) OR input ILIKE ANY($1) OR output ILIKE ANY($1) \
             ORDER BY created_at DESC, id DESC",
            PROMPT_COLUMNS
        ))
        .bind(&patterns)
        .fetch_all(&self.pool)
        .await?;
        debug!("Search matched {} prompts", rows.len());
        Ok(self.map_rows(rows))
    }

    #[instrument(skip(self))]
    async fn toggle_like(
        &self,
        prompt_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeOutcome, DomainError> {
        let row = sqlx::query_as::<_, (i32, bool)>(
            r#"UPDATE prompts
               SET liked_by = CASE
                       WHEN $2 = ANY(liked_by) THEN array_remove(liked_by, $2)
                       ELSE array_append(liked_by, $2)
                   END,
                   likes = CASE
                       WHEN $2 = ANY(liked_by) THEN GREATEST(likes - 1, 0)
                       ELSE likes + 1
                   END
               WHERE id = $1
               RETURNING likes, $2 = ANY(liked_by)"#,
        )
        .bind(prompt_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        let (likes, is_liked) =
            row.ok_or_else(|| DomainError::NotFound("Prompt not found".into()))?;
        Ok(LikeOutcome { likes, is_liked })
    }

    async fn adjust_comment_count(&self, prompt_id: Uuid, delta: i32) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE prompts SET comments_count = GREATEST(comments_count + $2, 0) WHERE id = $1",
        )
        .bind(prompt_id)
        .bind(delta)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_upvotes(&self, prompt_id: Uuid) -> Result<i32, DomainError> {
        self.bump_counter("upvotes", prompt_id).await
    }

    async fn increment_downvotes(&self, prompt_id: Uuid) -> Result<i32, DomainError> {
        self.bump_counter("downvotes", prompt_id).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_author(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM prompts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
