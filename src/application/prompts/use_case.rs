use super::dto::{
    CreatePromptRequest, DownvoteOutcome, ProfileView, PromptView, UpvoteOutcome,
};
use crate::{
    application::users_by_id,
    domain::{
        errors::DomainError,
        prompt::{
            entity::{NewPrompt, Prompt},
            repository::PromptRepository,
            value_objects::PromptOutput,
        },
        user::{entity::User, repository::UserRepository, role::Actor},
    },
};
use std::{cmp::Reverse, sync::Arc};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Words ignored when building search terms.
const STOP_WORDS: &[&str] = &[
    "is", "in", "are", "the", "of", "on", "to", "and", "a", "an", "at", "by", "for", "with",
    "was", "were", "be", "has", "had", "do", "does", "did", "from", "as", "but",
];

const MIN_TERM_LEN: usize = 3;
const LEADERBOARD_SIZE: i64 = 3;

/// Lowercases `query`, drops stop words and terms shorter than three
/// characters, and removes duplicates while keeping order.
pub fn search_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let word = word.to_lowercase();
        if word.chars().count() < MIN_TERM_LEN || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms
}

fn matched_terms(prompt: &Prompt, terms: &[String]) -> usize {
    let haystack = format!("{}\n{}\n{}", prompt.title, prompt.input, prompt.output.text).to_lowercase();
    terms.iter().filter(|t| haystack.contains(t.as_str())).count()
}

/// Prompt authoring, feeds, search and per-user read views.
pub struct PromptsUseCase {
    prompts: Arc<dyn PromptRepository>,
    users: Arc<dyn UserRepository>,
    output_separator: String,
}

impl PromptsUseCase {
    pub fn new(
        prompts: Arc<dyn PromptRepository>,
        users: Arc<dyn UserRepository>,
        output_separator: impl Into<String>,
    ) -> Self {
        Self {
            prompts,
            users,
            output_separator: output_separator.into(),
        }
    }

    /// Stores a new prompt owned by the caller and bumps their
    /// `total_prompts` counter.
    ///
    /// Outputs whose text or image URL contains the stored-output separator
    /// are refused, since they would not read back unchanged.
    #[instrument(skip(self, request), fields(user_id = %actor.id))]
    pub async fn create(
        &self,
        actor: Actor,
        request: CreatePromptRequest,
    ) -> Result<Prompt, DomainError> {
        let request = CreatePromptRequest {
            title: request.title.trim().to_string(),
            input: request.input.trim().to_string(),
            output: request.output.trim().to_string(),
            ai_model: request.ai_model.trim().to_string(),
            output_image_url: request
                .output_image_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            tags: request.tags,
        };
        request.validate()?;

        let output = PromptOutput::new(request.output, request.output_image_url);
        if !output.fits_legacy(&self.output_separator) {
            return Err(DomainError::InvalidArgument(format!(
                "Output must not contain '{}'",
                self.output_separator
            )));
        }

        let prompt = self
            .prompts
            .create(&NewPrompt {
                title: request.title,
                tags: request.tags.into_tags(),
                user_id: actor.id,
                input: request.input,
                output,
                ai_model: request.ai_model,
            })
            .await?;
        self.users.increment_total_prompts(actor.id).await?;

        info!(prompt_id = %prompt.id, "Prompt created");
        Ok(prompt)
    }

    /// Every prompt, newest first, annotated for the caller.
    pub async fn feed(&self, actor: Actor) -> Result<Vec<PromptView>, DomainError> {
        let prompts = self.prompts.list_all().await?;
        self.annotate(actor, prompts).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Prompt, DomainError> {
        self.prompts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Prompt not found".into()))
    }

    /// Prompts whose title, input or output text contain any search term,
    /// best matches first (then most liked, then newest).
    #[instrument(skip(self), fields(user_id = %actor.id))]
    pub async fn search(&self, actor: Actor, query: &str) -> Result<Vec<PromptView>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::InvalidArgument("Query is required".into()));
        }
        let terms = search_terms(query);
        if terms.is_empty() {
            debug!("Query reduced to no usable terms");
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(usize, Prompt)> = self
            .prompts
            .search(&terms)
            .await?
            .into_iter()
            .map(|p| (matched_terms(&p, &terms), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        ranked.sort_by_key(|(score, p)| (Reverse(*score), Reverse(p.likes), Reverse(p.created_at)));

        debug!(results = ranked.len(), "Search ranked");
        self.annotate(actor, ranked.into_iter().map(|(_, p)| p).collect())
            .await
    }

    #[instrument(skip(self))]
    pub async fn upvote(&self, prompt_id: Uuid) -> Result<UpvoteOutcome, DomainError> {
        let upvotes = self.prompts.increment_upvotes(prompt_id).await?;
        Ok(UpvoteOutcome { upvotes })
    }

    #[instrument(skip(self))]
    pub async fn downvote(&self, prompt_id: Uuid) -> Result<DownvoteOutcome, DomainError> {
        let downvotes = self.prompts.increment_downvotes(prompt_id).await?;
        Ok(DownvoteOutcome { downvotes })
    }

    /// The caller's own record and the prompts they authored.
    pub async fn profile(&self, actor: Actor) -> Result<ProfileView, DomainError> {
        let user = self.current_user(actor).await?;
        let prompts = self.prompts.list_by_author(actor.id).await?;
        Ok(ProfileView { user, prompts })
    }

    /// Prompts the caller bookmarked; references to deleted prompts are skipped.
    pub async fn bookmarks(&self, actor: Actor) -> Result<Vec<PromptView>, DomainError> {
        let user = self.current_user(actor).await?;
        let prompts = self.prompts.find_by_ids(&user.bookmarked_prompts).await?;
        self.annotate(actor, prompts).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<User>, DomainError> {
        self.users.top_by_total_prompts(LEADERBOARD_SIZE).await
    }

    async fn current_user(&self, actor: Actor) -> Result<User, DomainError> {
        self.users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    async fn annotate(
        &self,
        actor: Actor,
        prompts: Vec<Prompt>,
    ) -> Result<Vec<PromptView>, DomainError> {
        let author_ids: Vec<Uuid> = prompts
            .iter()
            .map(|p| p.user_id)
            .chain(std::iter::once(actor.id))
            .collect();
        let authors = users_by_id(self.users.as_ref(), author_ids).await?;
        let viewer = authors.get(&actor.id);

        Ok(prompts
            .into_iter()
            .map(|prompt| PromptView {
                author: authors.get(&prompt.user_id).map(|u| u.author_summary()),
                is_liked: prompt.is_liked_by(actor.id),
                is_bookmarked: viewer.is_some_and(|v| v.has_bookmarked(prompt.id)),
                prompt,
            })
            .collect())
    }
}
