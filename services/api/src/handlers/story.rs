use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::Story;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::story::{
    CreateStoryInput, CreateStoryUseCase, DeleteStoryUseCase, GetStoryUseCase, UpdateStoryInput,
    UpdateStoryUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub story_id: i32,
    pub title: String,
    pub url: String,
    pub author: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self {
            story_id: story.id,
            title: story.title,
            url: story.url,
            author: story.author,
            username: story.username,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

// ── POST /stories ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateStoryRequest {
    pub username: String,
    pub title: String,
    pub url: String,
}

pub async fn create_story(
    State(state): State<AppState>,
    Json(body): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<StoryResponse>), ApiError> {
    let usecase = CreateStoryUseCase {
        users: state.user_repo(),
        stories: state.story_repo(),
    };
    let story = usecase
        .execute(CreateStoryInput {
            username: body.username,
            title: body.title,
            url: body.url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(story.into())))
}

// ── GET /stories/{story_id} ──────────────────────────────────────────────────

pub async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<i32>,
) -> Result<Json<StoryResponse>, ApiError> {
    let usecase = GetStoryUseCase {
        stories: state.story_repo(),
    };
    let story = usecase.execute(story_id).await?;
    Ok(Json(story.into()))
}

// ── PATCH /stories/{story_id} ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStoryRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
}

pub async fn update_story(
    State(state): State<AppState>,
    Path(story_id): Path<i32>,
    Json(body): Json<UpdateStoryRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let usecase = UpdateStoryUseCase {
        stories: state.story_repo(),
    };
    let story = usecase
        .execute(
            story_id,
            UpdateStoryInput {
                title: body.title,
                url: body.url,
                author: body.author,
            },
        )
        .await?;
    Ok(Json(story.into()))
}

// ── DELETE /stories/{story_id} ───────────────────────────────────────────────

pub async fn delete_story(
    State(state): State<AppState>,
    Path(story_id): Path<i32>,
) -> Result<Json<StoryResponse>, ApiError> {
    let usecase = DeleteStoryUseCase {
        stories: state.story_repo(),
    };
    let story = usecase.execute(story_id).await?;
    Ok(Json(story.into()))
}
