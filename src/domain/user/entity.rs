use super::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identity record for a registered account.
///
/// # Invariants
/// - `username` and `email` are unique across all users
/// - `role` is one of `user`, `moderator`, `admin`
/// - `flag_count` only ever grows; it counts moderation deletions of this user's content
/// - `bookmarked_prompts` holds each prompt reference at most once
///
/// The password hash and the TOTP secret never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: Role,
    pub total_prompts: i32,
    pub flag_count: i32,
    pub bookmarked_prompts: Vec<Uuid>,
    pub profile_picture: Option<String>,
    pub two_factor_enabled: bool,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub two_factor_secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_bookmarked(&self, prompt_id: Uuid) -> bool {
        self.bookmarked_prompts.contains(&prompt_id)
    }

    pub fn author_summary(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.id,
            username: self.username.clone(),
            total_prompts: self.total_prompts,
            profile_picture: self.profile_picture.clone(),
        }
    }

    pub fn reporter_summary(&self) -> ReporterSummary {
        ReporterSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Fields needed to persist a freshly verified account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
}

/// Public display fields of a content author.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
    pub total_prompts: i32,
    pub profile_picture: Option<String>,
}

/// Public display fields of a reporting user, as shown to moderators.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ReporterSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}
