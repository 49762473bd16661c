use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    recovery::{initiate_recovery, redeem_recovery},
    story::{create_story, delete_story, get_story, update_story},
    user::{create_user, delete_user, get_user, update_user},
};
use crate::health::{healthz, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        .route("/users/{username}", get(get_user))
        .route("/users/{username}", patch(update_user))
        .route("/users/{username}", delete(delete_user))
        // Stories
        .route("/stories", post(create_story))
        .route("/stories/{story_id}", get(get_story))
        .route("/stories/{story_id}", patch(update_story))
        .route("/stories/{story_id}", delete(delete_story))
        // Account recovery
        .route("/users/{username}/recovery", post(initiate_recovery))
        .route("/users/{username}/recovery", put(redeem_recovery))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
