//! Process-local repositories.
//!
//! Each operation holds the collection's write lock for the whole document
//! mutation, which gives the same per-document atomicity the Postgres
//! repositories get from single-statement updates. Used by the test suite and
//! by `STORAGE_BACKEND=memory`.

use crate::domain::{
    errors::DomainError,
    event::{
        entity::{Event, NewEvent},
        repository::EventRepository,
    },
    prompt::{
        entity::{LikeOutcome, NewPrompt, Prompt},
        repository::PromptRepository,
    },
    report::{
        entity::{Report, ReportEntry, ReportTarget, SubmitOutcome},
        repository::ReportRepository,
    },
    social::{
        comment::{Comment, NewComment},
        repository::CommentRepository,
    },
    user::{
        entity::{NewUser, User},
        repository::UserRepository,
        role::Role,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, Uuid)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

// === Users ===

#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(DomainError::Conflict(
                "username or email already registered".into(),
            ));
        }
        let created = User {
            id: Uuid::now_v7(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: Role::User,
            total_prompts: 0,
            flag_count: 0,
            bookmarked_prompts: Vec::new(),
            profile_picture: user.profile_picture.clone(),
            two_factor_enabled: false,
            two_factor_secret: None,
            created_at: Utc::now(),
        };
        store.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.store.read().await.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users)
    }

    async fn top_by_total_prompts(&self, limit: i64) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.store.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.total_prompts.cmp(&a.total_prompts).then(a.id.cmp(&b.id)));
        users.truncate(limit.max(0) as usize);
        Ok(users)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        let user = store
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;
        user.role = role;
        Ok(())
    }

    async fn increment_total_prompts(&self, id: Uuid) -> Result<(), DomainError> {
        if let Some(user) = self.store.write().await.get_mut(&id) {
            user.total_prompts += 1;
        }
        Ok(())
    }

    async fn increment_flag_count(&self, id: Uuid) -> Result<bool, DomainError> {
        match self.store.write().await.get_mut(&id) {
            Some(user) => {
                user.flag_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn toggle_bookmark(&self, user_id: Uuid, prompt_id: Uuid) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let user = store
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;
        if user.has_bookmarked(prompt_id) {
            user.bookmarked_prompts.retain(|p| *p != prompt_id);
            Ok(false)
        } else {
            user.bookmarked_prompts.push(prompt_id);
            Ok(true)
        }
    }

    async fn set_two_factor(
        &self,
        id: Uuid,
        secret: Option<String>,
        enabled: bool,
    ) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        let user = store
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;
        user.two_factor_secret = secret;
        user.two_factor_enabled = enabled;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}

// === Prompts ===

#[derive(Default)]
pub struct InMemoryPromptRepository {
    store: RwLock<HashMap<Uuid, Prompt>>,
}

impl InMemoryPromptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bump(
    store: &mut HashMap<Uuid, Prompt>,
    id: Uuid,
    field: impl FnOnce(&mut Prompt) -> &mut i32,
) -> Result<i32, DomainError> {
    let prompt = store
        .get_mut(&id)
        .ok_or_else(|| DomainError::NotFound("Prompt not found".into()))?;
    let counter = field(prompt);
    *counter += 1;
    Ok(*counter)
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepository {
    async fn create(&self, prompt: &NewPrompt) -> Result<Prompt, DomainError> {
        let created = Prompt {
            id: Uuid::now_v7(),
            title: prompt.title.clone(),
            tags: prompt.tags.clone(),
            user_id: prompt.user_id,
            input: prompt.input.clone(),
            output: prompt.output.clone(),
            ai_model: prompt.ai_model.clone(),
            likes: 0,
            liked_by: Vec::new(),
            comments_count: 0,
            upvotes: 0,
            downvotes: 0,
            created_at: Utc::now(),
        };
        self.store.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Prompt>, DomainError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Prompt>, DomainError> {
        let store = self.store.read().await;
        let mut prompts: Vec<Prompt> = ids.iter().filter_map(|id| store.get(id).cloned()).collect();
        newest_first(&mut prompts, |p| (p.created_at, p.id));
        Ok(prompts)
    }

    async fn list_all(&self) -> Result<Vec<Prompt>, DomainError> {
        let mut prompts: Vec<Prompt> = self.store.read().await.values().cloned().collect();
        newest_first(&mut prompts, |p| (p.created_at, p.id));
        Ok(prompts)
    }

    async fn list_by_author(&self, user_id: Uuid) -> Result<Vec<Prompt>, DomainError> {
        let mut prompts: Vec<Prompt> = self
            .store
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut prompts, |p| (p.created_at, p.id));
        Ok(prompts)
    }

    async fn search(&self, terms: &[String]) -> Result<Vec<Prompt>, DomainError> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        let mut prompts: Vec<Prompt> = self
            .store
            .read()
            .await
            .values()
            .filter(|p| {
                let haystack = format!("{} {} {}", p.title, p.input, p.output.text).to_lowercase();
                terms.iter().any(|t| haystack.contains(t.as_str()))
            })
            .cloned()
            .collect();
        newest_first(&mut prompts, |p| (p.created_at, p.id));
        Ok(prompts)
    }

    async fn toggle_like(
        &self,
        prompt_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeOutcome, DomainError> {
        let mut store = self.store.write().await;
        let prompt = store
            .get_mut(&prompt_id)
            .ok_or_else(|| DomainError::NotFound("Prompt not found".into()))?;
        let is_liked = if prompt.is_liked_by(user_id) {
            prompt.liked_by.retain(|u| *u != user_id);
            false
        } else {
            prompt.liked_by.push(user_id);
            true
        };
        prompt.likes = prompt.liked_by.len() as i32;
        Ok(LikeOutcome {
            likes: prompt.likes,
            is_liked,
        })
    }

    async fn adjust_comment_count(&self, prompt_id: Uuid, delta: i32) -> Result<(), DomainError> {
        if let Some(prompt) = self.store.write().await.get_mut(&prompt_id) {
            prompt.comments_count = (prompt.comments_count + delta).max(0);
        }
        Ok(())
    }

    async fn increment_upvotes(&self, prompt_id: Uuid) -> Result<i32, DomainError> {
        bump(&mut *self.store.write().await, prompt_id, |p| &mut p.upvotes)
    }

    async fn increment_downvotes(&self, prompt_id: Uuid) -> Result<i32, DomainError> {
        bump(&mut *self.store.write().await, prompt_id, |p| &mut p.downvotes)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }

    async fn delete_by_author(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, p| p.user_id != user_id);
        Ok((before - store.len()) as u64)
    }
}

// === Comments ===

#[derive(Default)]
pub struct InMemoryCommentRepository {
    store: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let created = Comment {
            id: Uuid::now_v7(),
            prompt_id: comment.prompt_id,
            user_id: comment.user_id,
            text: comment.text.clone(),
            created_at: Utc::now(),
        };
        self.store.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .store
            .read()
            .await
            .values()
            .filter(|c| c.prompt_id == prompt_id)
            .cloned()
            .collect();
        newest_first(&mut comments, |c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }

    async fn delete_by_author(&self, user_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let mut store = self.store.write().await;
        let ids: Vec<Uuid> = store
            .values()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.id)
            .collect();
        Ok(ids.iter().filter_map(|id| store.remove(id)).collect())
    }
}

// === Reports ===

#[derive(Default)]
pub struct InMemoryReportRepository {
    store: RwLock<HashMap<Uuid, Report>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DomainError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_target(&self, target: ReportTarget) -> Result<Option<Report>, DomainError> {
        let store = self.store.read().await;
        Ok(store.values().find(|r| r.target == target).cloned())
    }

    async fn submit(
        &self,
        target: ReportTarget,
        entry: ReportEntry,
    ) -> Result<SubmitOutcome, DomainError> {
        let mut store = self.store.write().await;
        if let Some(report) = store.values_mut().find(|r| r.target == target) {
            if report.has_reporter(entry.reporter_id) {
                return Err(DomainError::AlreadyReported);
            }
            report.entries.push(entry);
            return Ok(SubmitOutcome {
                report: report.clone(),
                created: false,
            });
        }
        let report = Report {
            id: Uuid::now_v7(),
            target,
            entries: vec![entry],
        };
        store.insert(report.id, report.clone());
        Ok(SubmitOutcome {
            report,
            created: true,
        })
    }

    async fn list_all(&self) -> Result<Vec<Report>, DomainError> {
        let mut reports: Vec<Report> = self.store.read().await.values().cloned().collect();
        reports.sort_by_key(|r| r.id);
        Ok(reports)
    }

    async fn delete_by_target_id(&self, target_id: Uuid) -> Result<Vec<Report>, DomainError> {
        let mut store = self.store.write().await;
        let ids: Vec<Uuid> = store
            .values()
            .filter(|r| r.target.id() == target_id)
            .map(|r| r.id)
            .collect();
        Ok(ids.iter().filter_map(|id| store.remove(id)).collect())
    }

    async fn delete_by_target(&self, target: ReportTarget) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, r| r.target != target);
        Ok(store.len() < before)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}

// === Events ===

#[derive(Default)]
pub struct InMemoryEventRepository {
    store: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: &NewEvent) -> Result<Event, DomainError> {
        let created = Event {
            id: Uuid::now_v7(),
            title: event.title.clone(),
            event_date: event.event_date,
            event_time: event.event_time.clone(),
            organizer: event.organizer.clone(),
            registration_link: event.registration_link.clone(),
            created_at: Utc::now(),
        };
        self.store.write().await.push(created.clone());
        Ok(created)
    }

    async fn upcoming(&self, from: NaiveDate, limit: i64) -> Result<Vec<Event>, DomainError> {
        let mut events: Vec<Event> = self
            .store
            .read()
            .await
            .iter()
            .filter(|e| e.event_date >= from)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.event_date, e.id));
        events.truncate(limit.max(0) as usize);
        Ok(events)
    }
}
