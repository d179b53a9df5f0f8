use axum::extract::{Path, State};
use serde_json::Value;

use crate::engine::Resource;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ProfileView;
use crate::state::AppState;

/// GET /api/profile - All profiles with owner name and avatar
pub async fn profile_list(State(state): State<AppState>) -> ApiResult<Vec<ProfileView>> {
    let profiles = state.profiles().list_profiles().await?;
    Ok(ApiResponse::success(profiles))
}

/// GET /api/profile/user/:user_id - Profile owned by the given user
pub async fn profile_by_user(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult<ProfileView> {
    let owner = parse_id(&user_id, Resource::Profile)?;
    let profile = state.profiles().profile_by_owner(owner).await?;
    Ok(ApiResponse::success(profile))
}

/// GET /api/profile/github/:username - Latest public repositories from GitHub
pub async fn github_repos(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<Vec<Value>> {
    let repos = state.github.latest_repos(&username).await?;
    Ok(ApiResponse::success(repos))
}
