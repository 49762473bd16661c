use chrono::Utc;
use rand::Rng;

use crate::domain::repository::{
    CredentialHasher, RecoveryCodeRepository, SmsSender, UserRepository,
};
use crate::domain::types::{RECOVERY_CODE_LEN, RecoveryEntry};
use crate::error::ApiError;

/// Charset for recovery codes (digits only; leading zeros are kept by
/// drawing each position independently).
const CHARSET: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..RECOVERY_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── InitiateRecovery ─────────────────────────────────────────────────────────

pub struct InitiateRecoveryUseCase<U, R, H, S>
where
    U: UserRepository,
    R: RecoveryCodeRepository,
    H: CredentialHasher,
    S: SmsSender,
{
    pub users: U,
    pub recovery: R,
    pub hasher: H,
    pub sms: S,
}

impl<U, R, H, S> InitiateRecoveryUseCase<U, R, H, S>
where
    U: UserRepository,
    R: RecoveryCodeRepository,
    H: CredentialHasher,
    S: SmsSender,
{
    /// Issues a fresh single-use code and dispatches it over SMS,
    /// replacing any prior entry for the account.
    ///
    /// Returns `Ok(false)`, never an error, when the account does not
    /// exist or has no phone on file. The route always acknowledges the
    /// request the same way, so the boolean must stay silent at the HTTP
    /// boundary (anti-enumeration).
    pub async fn execute(&self, username: &str) -> Result<bool, ApiError> {
        let Some(user) = self.users.find(username).await? else {
            return Ok(false);
        };
        let Some(phone) = user.phone else {
            return Ok(false);
        };

        let code = generate_code();
        let entry = RecoveryEntry {
            username: username.to_owned(),
            code_hash: self.hasher.hash(&code)?,
            created_at: Utc::now(),
        };
        self.recovery.replace(&entry).await?;

        // Plaintext code exists only here and on the wire; it is never
        // persisted. Delivery is best-effort.
        let body = format!("Your Hack-or-Snooze recovery code is {code}.");
        self.sms.send(&phone, &body).await;

        Ok(true)
    }
}

// ── RedeemRecovery ───────────────────────────────────────────────────────────

pub struct RedeemRecoveryUseCase<R, H>
where
    R: RecoveryCodeRepository,
    H: CredentialHasher,
{
    pub recovery: R,
    pub hasher: H,
}

impl<R, H> RedeemRecoveryUseCase<R, H>
where
    R: RecoveryCodeRepository,
    H: CredentialHasher,
{
    /// Redeems a recovery code and sets a new password.
    ///
    /// Three checks run in strict order, each a terminal failure with the
    /// same `RecoveryInvalid` error so a caller cannot tell which one
    /// tripped:
    ///
    /// 1. an entry must exist for the account;
    /// 2. the entry must be inside the expiry window; an expired entry
    ///    is purged on the spot, even though this attempt still fails;
    /// 3. the supplied code must match the stored hash; on mismatch the
    ///    entry stays so the account can retry until it expires.
    ///
    /// On success the password write and the entry deletion happen in one
    /// transaction; losing the conditional delete to a concurrent
    /// redemption also surfaces as `RecoveryInvalid`.
    pub async fn execute(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let entry = self
            .recovery
            .find(username)
            .await?
            .ok_or(ApiError::RecoveryInvalid)?;

        if entry.is_expired(Utc::now()) {
            self.recovery.delete(username).await?;
            return Err(ApiError::RecoveryInvalid);
        }

        if !self.hasher.verify(code, &entry.code_hash) {
            return Err(ApiError::RecoveryInvalid);
        }

        let new_hash = self.hasher.hash(new_password)?;
        if !self.recovery.redeem(username, &new_hash).await? {
            return Err(ApiError::RecoveryInvalid);
        }
        Ok(())
    }
}
