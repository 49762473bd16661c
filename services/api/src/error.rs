use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("story not found")]
    StoryNotFound,
    #[error("user already exists")]
    UserExists,
    #[error("please provide a valid US phone number")]
    InvalidPhone,
    #[error("no fields to update")]
    MissingData,
    /// Single message for all three redemption failures (no entry,
    /// expired entry, wrong code) so callers cannot tell them apart.
    #[error("recovery information is invalid")]
    RecoveryInvalid,
    #[error("account recovery is not configured")]
    RecoveryNotConfigured,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::StoryNotFound => "STORY_NOT_FOUND",
            Self::UserExists => "USER_EXISTS",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::MissingData => "MISSING_DATA",
            Self::RecoveryInvalid => "RECOVERY_INVALID",
            Self::RecoveryNotConfigured => "RECOVERY_NOT_CONFIGURED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::StoryNotFound => StatusCode::NOT_FOUND,
            Self::UserExists => StatusCode::CONFLICT,
            Self::InvalidPhone | Self::MissingData | Self::RecoveryInvalid => {
                StatusCode::BAD_REQUEST
            }
            Self::RecoveryNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only. tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
