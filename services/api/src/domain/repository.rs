#![allow(async_fn_in_trait)]

use crate::domain::types::{
    NewStory, NewUser, RecoveryEntry, Story, StoryPatch, User, UserPatch,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Insert a new account. The caller has already checked for duplicates.
    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;

    /// Apply a partial update and return the updated row. Only
    /// whitelisted columns are ever written; `updated_at` is bumped.
    async fn update(&self, username: &str, patch: &UserPatch) -> Result<User, ApiError>;

    /// Delete an account. Stories, favorites and any recovery entry go
    /// with it via foreign-key cascade. Returns `false` if no row existed.
    async fn delete(&self, username: &str) -> Result<bool, ApiError>;
}

/// Repository for stories.
pub trait StoryRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<Story>, ApiError>;

    async fn create(&self, story: &NewStory) -> Result<Story, ApiError>;

    /// Apply a partial update and return the updated row.
    async fn update(&self, id: i32, patch: &StoryPatch) -> Result<Story, ApiError>;

    /// Returns `false` if no row existed.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;

    /// Stories authored by the given user, newest first.
    async fn list_by_author(&self, username: &str) -> Result<Vec<Story>, ApiError>;

    /// Stories the given user has favorited, newest first.
    async fn list_favorites(&self, username: &str) -> Result<Vec<Story>, ApiError>;

    /// Rewrite the denormalized `author` column on every story the user
    /// authored. Returns the number of stories touched.
    async fn update_author(&self, username: &str, new_name: &str) -> Result<u64, ApiError>;
}

/// Repository for SMS recovery codes (at most one live entry per account).
pub trait RecoveryCodeRepository: Send + Sync {
    async fn find(&self, username: &str) -> Result<Option<RecoveryEntry>, ApiError>;

    /// Replace any prior entry for the account with a fresh one, in a
    /// single transaction.
    async fn replace(&self, entry: &RecoveryEntry) -> Result<(), ApiError>;

    /// Remove the entry. Returns `false` if none existed; used both for
    /// expiry purges and to detect redemption races.
    async fn delete(&self, username: &str) -> Result<bool, ApiError>;

    /// Single-use redemption: delete the entry and write the new password
    /// hash in one transaction. The conditional delete is the commit
    /// point: if the entry is already gone (a concurrent redemption
    /// won), nothing is written and `false` comes back.
    async fn redeem(&self, username: &str, new_password_hash: &str) -> Result<bool, ApiError>;
}

/// One-way hash capability for passwords and recovery codes.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, ApiError>;

    /// Constant-time comparison of a plaintext against a stored hash.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Outbound SMS capability. Best-effort: implementations log failures
/// and never surface them to the caller.
pub trait SmsSender: Send + Sync {
    async fn send(&self, to_e164: &str, body: &str);
}
