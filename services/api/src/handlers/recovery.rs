use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::recovery::{InitiateRecoveryUseCase, RedeemRecoveryUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ── POST /users/{username}/recovery ──────────────────────────────────────────

/// Always acknowledges with the same body, whether or not a code was
/// actually issued; the response must not reveal if the username exists
/// or has a phone on file.
pub async fn initiate_recovery(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(sms) = state.sms_sender() else {
        return Err(ApiError::RecoveryNotConfigured);
    };
    let usecase = InitiateRecoveryUseCase {
        users: state.user_repo(),
        recovery: state.recovery_repo(),
        hasher: state.hasher(),
        sms,
    };
    usecase.execute(&username).await?;
    Ok(Json(MessageResponse {
        message: "Request Acknowledged.".to_owned(),
    }))
}

// ── PUT /users/{username}/recovery ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct RedeemRecoveryRequest {
    pub code: String,
    pub password: String,
}

pub async fn redeem_recovery(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<RedeemRecoveryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.sms_sender().is_none() {
        return Err(ApiError::RecoveryNotConfigured);
    }
    let usecase = RedeemRecoveryUseCase {
        recovery: state.recovery_repo(),
        hasher: state.hasher(),
    };
    usecase.execute(&username, &body.code, &body.password).await?;
    Ok(Json(MessageResponse {
        message: "Password successfully updated.".to_owned(),
    }))
}
