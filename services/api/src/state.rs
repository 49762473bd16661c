use sea_orm::DatabaseConnection;

use crate::infra::db::{DbRecoveryCodeRepository, DbStoryRepository, DbUserRepository};
use crate::infra::password::Argon2Hasher;
use crate::infra::sms::TwilioSmsSender;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// SMS capability, present only when Twilio is configured. Recovery
    /// handlers report `RecoveryNotConfigured` when it is absent.
    pub sms: Option<TwilioSmsSender>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn story_repo(&self) -> DbStoryRepository {
        DbStoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn recovery_repo(&self) -> DbRecoveryCodeRepository {
        DbRecoveryCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }

    pub fn sms_sender(&self) -> Option<TwilioSmsSender> {
        self.sms.clone()
    }
}
