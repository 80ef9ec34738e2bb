use crate::domain::{
    errors::DomainError,
    user::{
        entity::{NewUser, User},
        repository::UserRepository,
        role::Role,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, total_prompts, flag_count, \
     bookmarked_prompts, profile_picture, two_factor_enabled, two_factor_secret, created_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    total_prompts: i32,
    flag_count: i32,
    bookmarked_prompts: Vec<Uuid>,
    profile_picture: Option<String>,
    two_factor_enabled: bool,
    two_factor_secret: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        let role = r.role.parse().unwrap_or_else(|_| {
            warn!(user_id = %r.id, role = %r.role, "Unknown stored role, treating as user");
            Role::User
        });
        User {
            id: r.id,
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            role,
            total_prompts: r.total_prompts,
            flag_count: r.flag_count,
            bookmarked_prompts: r.bookmarked_prompts,
            profile_picture: r.profile_picture,
            two_factor_enabled: r.two_factor_enabled,
            two_factor_secret: r.two_factor_secret,
            created_at: r.created_at,
        }
    }
}

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxUserRepository with connection pool");
        Self { pool }
    }

    async fn fetch_optional(
        &self,
        filter: &str,
        bind: impl for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE {} = $1",
            USER_COLUMNS, filter
        ))
        .bind(bind)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, username, email, password_hash, profile_picture) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile_picture)
        .fetch_one(&self.pool)
        .await?;
        debug!(user_id = %row.id, "User created");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_optional("id", id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_optional("email", email.to_string()).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.fetch_optional("username", username.to_string()).await
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1)",
            USER_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn top_by_total_prompts(&self, limit: i64) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY total_prompts DESC, id LIMIT $1",
            USER_COLUMNS
        ))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: Uuid, role: Role) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("User not found".into()));
        }
        Ok(())
    }

    async fn increment_total_prompts(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET total_prompts = total_prompts + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn increment_flag_count(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET flag_count = flag_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn toggle_bookmark(&self, user_id: Uuid, prompt_id: Uuid) -> Result<bool, DomainError> {
        let bookmarked = sqlx::query_scalar::<_, bool>(
            r#"UPDATE users
               SET bookmarked_prompts = CASE
                   WHEN $2 = ANY(bookmarked_prompts) THEN array_remove(bookmarked_prompts, $2)
                   ELSE array_append(bookmarked_prompts, $2)
               END
               WHERE id = $1
               RETURNING $2 = ANY(bookmarked_prompts)"#,
        )
        .bind(user_id)
        .bind(prompt_id)
        .fetch_optional(&self.pool)
        .await?;
        bookmarked.ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    async fn set_two_factor(
        &self,
        id: Uuid,
        secret: Option<String>,
        enabled: bool,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET two_factor_secret = $2, two_factor_enabled = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(secret)
        .bind(enabled)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("User not found".into()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
