use chrono::{DateTime, Duration, Utc};

/// Registered account. The password hash never leaves the infra layer,
/// so it is not part of this type.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New account to insert, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

/// Partial update of an account. Only present fields are written; the
/// infra layer maps each one to a whitelisted column.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password_hash.is_none() && self.phone.is_none()
    }
}

/// Posted story. `author` is a denormalized copy of the owning user's
/// display name as of the story's last author-side update.
#[derive(Debug, Clone)]
pub struct Story {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub author: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStory {
    pub title: String,
    pub url: String,
    pub author: String,
    pub username: String,
}

/// Partial update of a story.
#[derive(Debug, Clone, Default)]
pub struct StoryPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
}

impl StoryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.author.is_none()
    }
}

/// Live SMS recovery code for an account, stored hashed. At most one
/// entry exists per username; a fresh request replaces the old one.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub username: String,
    pub code_hash: String,
    pub created_at: DateTime<Utc>,
}

impl RecoveryEntry {
    /// Expiry is enforced at read time, not by a background sweep: the
    /// first check after the window elapses purges the entry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::seconds(RECOVERY_TTL_SECS)
    }
}

/// Recovery code length in digits (fixed width, leading zeros kept).
pub const RECOVERY_CODE_LEN: usize = 6;

/// Recovery code time-to-live in seconds.
pub const RECOVERY_TTL_SECS: i64 = 600;
