use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use snooze_api::domain::repository::{
    CredentialHasher, RecoveryCodeRepository, SmsSender, StoryRepository, UserRepository,
};
use snooze_api::domain::types::{
    NewStory, NewUser, RecoveryEntry, Story, StoryPatch, User, UserPatch,
};
use snooze_api::error::ApiError;

pub fn test_user(username: &str, name: &str, phone: Option<&str>) -> User {
    User {
        username: username.to_owned(),
        name: name.to_owned(),
        phone: phone.map(str::to_owned),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ── FakeHasher ───────────────────────────────────────────────────────────────

/// Deterministic stand-in for argon2 so tests can assert on stored
/// hashes without doing real key derivation.
#[derive(Clone)]
pub struct FakeHasher;

impl FakeHasher {
    pub fn hash_of(plaintext: &str) -> String {
        format!("$fake${plaintext}")
    }
}

impl CredentialHasher for FakeHasher {
    fn hash(&self, plaintext: &str) -> Result<String, ApiError> {
        Ok(Self::hash_of(plaintext))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        hash == Self::hash_of(plaintext)
    }
}

// ── RecordingSms ─────────────────────────────────────────────────────────────

/// Records every message instead of sending it, so tests can read the
/// plaintext recovery code off the "wire".
#[derive(Clone)]
pub struct RecordingSms {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSms {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }

    /// Extracts the 6-digit code from the last sent message body.
    pub fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let (_, body) = sent.last().expect("no sms sent");
        body.chars().filter(char::is_ascii_digit).collect()
    }
}

impl SmsSender for RecordingSms {
    async fn send(&self, to_e164: &str, body: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((to_e164.to_owned(), body.to_owned()));
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    /// Password hashes by username, tracked separately since `User`
    /// never carries its hash.
    pub hashes: Arc<Mutex<HashMap<String, String>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            hashes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn hashes_handle(&self) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::clone(&self.hashes)
    }
}

impl UserRepository for MockUserRepo {
    async fn find(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let created = User {
            username: user.username.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.lock().unwrap().push(created.clone());
        self.hashes
            .lock()
            .unwrap()
            .insert(user.username.clone(), user.password_hash.clone());
        Ok(created)
    }

    async fn update(&self, username: &str, patch: &UserPatch) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(ApiError::UserNotFound)?;
        if let Some(ref name) = patch.name {
            user.name = name.clone();
        }
        if let Some(ref phone) = patch.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(ref hash) = patch.password_hash {
            self.hashes
                .lock()
                .unwrap()
                .insert(username.to_owned(), hash.clone());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, username: &str) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.username != username);
        Ok(users.len() < before)
    }
}

// ── MockStoryRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockStoryRepo {
    pub stories: Arc<Mutex<Vec<Story>>>,
    pub favorites: Arc<Mutex<Vec<(String, i32)>>>,
    next_id: Arc<Mutex<i32>>,
}

impl MockStoryRepo {
    pub fn new(stories: Vec<Story>) -> Self {
        let next_id = stories.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            stories: Arc::new(Mutex::new(stories)),
            favorites: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(Mutex::new(next_id)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn stories_handle(&self) -> Arc<Mutex<Vec<Story>>> {
        Arc::clone(&self.stories)
    }
}

pub fn test_story(id: i32, title: &str, author: &str, username: &str) -> Story {
    Story {
        id,
        title: title.to_owned(),
        url: format!("http://example.com/{id}"),
        author: author.to_owned(),
        username: username.to_owned(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

impl StoryRepository for MockStoryRepo {
    async fn find(&self, id: i32) -> Result<Option<Story>, ApiError> {
        Ok(self
            .stories
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create(&self, story: &NewStory) -> Result<Story, ApiError> {
        let mut next_id = self.next_id.lock().unwrap();
        let created = Story {
            id: *next_id,
            title: story.title.clone(),
            url: story.url.clone(),
            author: story.author.clone(),
            username: story.username.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        *next_id += 1;
        self.stories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, patch: &StoryPatch) -> Result<Story, ApiError> {
        let mut stories = self.stories.lock().unwrap();
        let story = stories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ApiError::StoryNotFound)?;
        if let Some(ref title) = patch.title {
            story.title = title.clone();
        }
        if let Some(ref url) = patch.url {
            story.url = url.clone();
        }
        if let Some(ref author) = patch.author {
            story.author = author.clone();
        }
        story.updated_at = Utc::now();
        Ok(story.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut stories = self.stories.lock().unwrap();
        let before = stories.len();
        stories.retain(|s| s.id != id);
        Ok(stories.len() < before)
    }

    async fn list_by_author(&self, username: &str) -> Result<Vec<Story>, ApiError> {
        Ok(self
            .stories
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.username == username)
            .cloned()
            .collect())
    }

    async fn list_favorites(&self, username: &str) -> Result<Vec<Story>, ApiError> {
        let favorites = self.favorites.lock().unwrap();
        let story_ids: Vec<i32> = favorites
            .iter()
            .filter(|(u, _)| u == username)
            .map(|(_, id)| *id)
            .collect();
        Ok(self
            .stories
            .lock()
            .unwrap()
            .iter()
            .filter(|s| story_ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn update_author(&self, username: &str, new_name: &str) -> Result<u64, ApiError> {
        let mut stories = self.stories.lock().unwrap();
        let mut touched = 0;
        for story in stories.iter_mut().filter(|s| s.username == username) {
            story.author = new_name.to_owned();
            story.updated_at = Utc::now();
            touched += 1;
        }
        Ok(touched)
    }
}

// ── MockRecoveryRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockRecoveryRepo {
    pub entries: Arc<Mutex<HashMap<String, RecoveryEntry>>>,
    pub password_updates: Arc<Mutex<Vec<(String, String)>>>,
    /// When set, `redeem` reports the entry as already gone without
    /// touching anything, simulating losing the conditional delete to a
    /// concurrent redemption.
    pub lose_redeem_race: bool,
}

impl MockRecoveryRepo {
    pub fn empty() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            password_updates: Arc::new(Mutex::new(vec![])),
            lose_redeem_race: false,
        }
    }

    pub fn with_entry(entry: RecoveryEntry) -> Self {
        let repo = Self::empty();
        repo.entries
            .lock()
            .unwrap()
            .insert(entry.username.clone(), entry);
        repo
    }

    pub fn entries_handle(&self) -> Arc<Mutex<HashMap<String, RecoveryEntry>>> {
        Arc::clone(&self.entries)
    }

    pub fn password_updates_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.password_updates)
    }
}

impl RecoveryCodeRepository for MockRecoveryRepo {
    async fn find(&self, username: &str) -> Result<Option<RecoveryEntry>, ApiError> {
        Ok(self.entries.lock().unwrap().get(username).cloned())
    }

    async fn replace(&self, entry: &RecoveryEntry) -> Result<(), ApiError> {
        self.entries
            .lock()
            .unwrap()
            .insert(entry.username.clone(), entry.clone());
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<bool, ApiError> {
        Ok(self.entries.lock().unwrap().remove(username).is_some())
    }

    async fn redeem(&self, username: &str, new_password_hash: &str) -> Result<bool, ApiError> {
        if self.lose_redeem_race {
            return Ok(false);
        }
        if self.entries.lock().unwrap().remove(username).is_none() {
            return Ok(false);
        }
        self.password_updates
            .lock()
            .unwrap()
            .push((username.to_owned(), new_password_hash.to_owned()));
        Ok(true)
    }
}
