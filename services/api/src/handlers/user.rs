use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::story::StoryResponse;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, UpdateUserInput,
    UpdateUserUseCase, UserDetail,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stories: Vec<StoryResponse>,
    pub favorites: Vec<StoryResponse>,
}

impl From<UserDetail> for UserResponse {
    fn from(detail: UserDetail) -> Self {
        Self {
            username: detail.user.username,
            name: detail.user.name,
            phone: detail.user.phone,
            created_at: detail.user.created_at,
            updated_at: detail.user.updated_at,
            stories: detail.stories.into_iter().map(Into::into).collect(),
            favorites: detail.favorites.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub password: String,
    pub phone: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
    };
    let detail = usecase
        .execute(CreateUserInput {
            username: body.username,
            name: body.name,
            password: body.password,
            phone: body.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

// ── GET /users/{username} ────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
        stories: state.story_repo(),
    };
    let detail = usecase.execute(&username).await?;
    Ok(Json(detail.into()))
}

// ── PATCH /users/{username} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
        stories: state.story_repo(),
        hasher: state.hasher(),
    };
    let detail = usecase
        .execute(
            &username,
            UpdateUserInput {
                name: body.name,
                password: body.password,
                phone: body.phone,
            },
        )
        .await?;
    Ok(Json(detail.into()))
}

// ── DELETE /users/{username} ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&username).await?;
    Ok(Json(MessageResponse {
        message: format!("User '{username}' successfully deleted."),
    }))
}
