use crate::domain::phone::normalize_phone;
use crate::domain::repository::{CredentialHasher, StoryRepository, UserRepository};
use crate::domain::types::{NewUser, Story, User, UserPatch};
use crate::error::ApiError;

/// User plus the projections the API returns alongside it. Always
/// re-fetched after a write; nothing here mirrors in-memory state.
pub struct UserDetail {
    pub user: User,
    pub stories: Vec<Story>,
    pub favorites: Vec<Story>,
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub name: String,
    pub password: String,
    pub phone: Option<String>,
}

pub struct CreateUserUseCase<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    pub users: U,
    pub hasher: H,
}

impl<U, H> CreateUserUseCase<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    pub async fn execute(&self, input: CreateUserInput) -> Result<UserDetail, ApiError> {
        if self.users.find(&input.username).await?.is_some() {
            return Err(ApiError::UserExists);
        }
        let phone = input.phone.as_deref().map(normalize_phone).transpose()?;
        let user = self
            .users
            .create(&NewUser {
                username: input.username,
                name: input.name,
                password_hash: self.hasher.hash(&input.password)?,
                phone,
            })
            .await?;
        Ok(UserDetail {
            user,
            stories: vec![],
            favorites: vec![],
        })
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U, S>
where
    U: UserRepository,
    S: StoryRepository,
{
    pub users: U,
    pub stories: S,
}

impl<U, S> GetUserUseCase<U, S>
where
    U: UserRepository,
    S: StoryRepository,
{
    pub async fn execute(&self, username: &str) -> Result<UserDetail, ApiError> {
        let user = self
            .users
            .find(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let stories = self.stories.list_by_author(username).await?;
        let favorites = self.stories.list_favorites(username).await?;
        Ok(UserDetail {
            user,
            stories,
            favorites,
        })
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateUserUseCase<U, S, H>
where
    U: UserRepository,
    S: StoryRepository,
    H: CredentialHasher,
{
    pub users: U,
    pub stories: S,
    pub hasher: H,
}

impl<U, S, H> UpdateUserUseCase<U, S, H>
where
    U: UserRepository,
    S: StoryRepository,
    H: CredentialHasher,
{
    /// Patches an account. A `name` change also rewrites the denormalized
    /// `author` column on every story the account authored. The cascade
    /// fires only when `name` is in the patch, not on every field change.
    pub async fn execute(
        &self,
        username: &str,
        input: UpdateUserInput,
    ) -> Result<UserDetail, ApiError> {
        if input.name.is_none() && input.password.is_none() && input.phone.is_none() {
            return Err(ApiError::MissingData);
        }
        self.users
            .find(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let patch = UserPatch {
            name: input.name.clone(),
            password_hash: input
                .password
                .as_deref()
                .map(|p| self.hasher.hash(p))
                .transpose()?,
            phone: input.phone.as_deref().map(normalize_phone).transpose()?,
        };
        let user = self.users.update(username, &patch).await?;

        if let Some(ref new_name) = input.name {
            self.stories.update_author(username, new_name).await?;
        }

        // Re-fetch projections after the write so the cascade is visible
        // in the response.
        let stories = self.stories.list_by_author(username).await?;
        let favorites = self.stories.list_favorites(username).await?;
        Ok(UserDetail {
            user,
            stories,
            favorites,
        })
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    /// Deletes an account; stories, favorites and any live recovery entry
    /// follow via foreign-key cascade.
    pub async fn execute(&self, username: &str) -> Result<(), ApiError> {
        if !self.users.delete(username).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}
