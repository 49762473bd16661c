use crate::domain::repository::{StoryRepository, UserRepository};
use crate::domain::types::{NewStory, Story, StoryPatch};
use crate::error::ApiError;

// ── CreateStory ──────────────────────────────────────────────────────────────

pub struct CreateStoryInput {
    pub username: String,
    pub title: String,
    pub url: String,
}

pub struct CreateStoryUseCase<U, S>
where
    U: UserRepository,
    S: StoryRepository,
{
    pub users: U,
    pub stories: S,
}

impl<U, S> CreateStoryUseCase<U, S>
where
    U: UserRepository,
    S: StoryRepository,
{
    /// Posts a story. The `author` column is filled from the owning
    /// account's current display name, not from request input.
    pub async fn execute(&self, input: CreateStoryInput) -> Result<Story, ApiError> {
        let user = self
            .users
            .find(&input.username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        self.stories
            .create(&NewStory {
                title: input.title,
                url: input.url,
                author: user.name,
                username: user.username,
            })
            .await
    }
}

// ── GetStory ─────────────────────────────────────────────────────────────────

pub struct GetStoryUseCase<S: StoryRepository> {
    pub stories: S,
}

impl<S: StoryRepository> GetStoryUseCase<S> {
    pub async fn execute(&self, id: i32) -> Result<Story, ApiError> {
        self.stories
            .find(id)
            .await?
            .ok_or(ApiError::StoryNotFound)
    }
}

// ── UpdateStory ──────────────────────────────────────────────────────────────

pub struct UpdateStoryInput {
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
}

pub struct UpdateStoryUseCase<S: StoryRepository> {
    pub stories: S,
}

impl<S: StoryRepository> UpdateStoryUseCase<S> {
    pub async fn execute(&self, id: i32, input: UpdateStoryInput) -> Result<Story, ApiError> {
        let patch = StoryPatch {
            title: input.title,
            url: input.url,
            author: input.author,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }
        self.stories
            .find(id)
            .await?
            .ok_or(ApiError::StoryNotFound)?;
        self.stories.update(id, &patch).await
    }
}

// ── DeleteStory ──────────────────────────────────────────────────────────────

pub struct DeleteStoryUseCase<S: StoryRepository> {
    pub stories: S,
}

impl<S: StoryRepository> DeleteStoryUseCase<S> {
    /// Deletes a story and returns its last state.
    pub async fn execute(&self, id: i32) -> Result<Story, ApiError> {
        let story = self
            .stories
            .find(id)
            .await?
            .ok_or(ApiError::StoryNotFound)?;
        self.stories.delete(id).await?;
        Ok(story)
    }
}
