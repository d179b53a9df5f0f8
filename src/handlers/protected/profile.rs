use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::database::models::Profile;
use crate::engine::sections::{EducationInput, ExperienceInput, SectionKind};
use crate::engine::{ProfileInput, Resource};
use crate::handlers::{parse_id, Message};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ProfileView;
use crate::state::AppState;

/// GET /api/profile/me - The caller's own profile
pub async fn profile_me(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<ProfileView> {
    let profile = state.profiles().my_profile(auth.user_id).await?;
    Ok(ApiResponse::success(profile))
}

/// POST /api/profile - Create or update the caller's profile
///
/// Fields left out (or blank) keep their stored value. `skills` is a
/// comma-separated string.
pub async fn profile_upsert(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ProfileInput>, JsonRejection>,
) -> ApiResult<Profile> {
    let Json(input) = payload?;
    let update = input.into_update()?;
    let profile = state.profiles().upsert_profile(auth.user_id, update).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile - Remove the caller's posts, profile and account
pub async fn account_delete(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<Message> {
    state.profiles().delete_account(auth.user_id).await?;
    Ok(ApiResponse::success(Message::new("User deleted")))
}

/// PUT /api/profile/experience - Add an entry at the head of the experience list
pub async fn experience_add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ExperienceInput>, JsonRejection>,
) -> ApiResult<Profile> {
    let Json(input) = payload?;
    let entry = input.into_entry()?;
    let profile = state.profiles().add_section(auth.user_id, entry).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile/experience/:exp_id
pub async fn experience_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> ApiResult<Profile> {
    let exp_id = parse_id(&exp_id, Resource::Experience)?;
    let profile = state
        .profiles()
        .remove_section(auth.user_id, SectionKind::Experience, exp_id)
        .await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /api/profile/education - Add an entry at the head of the education list
pub async fn education_add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<EducationInput>, JsonRejection>,
) -> ApiResult<Profile> {
    let Json(input) = payload?;
    let entry = input.into_entry()?;
    let profile = state.profiles().add_section(auth.user_id, entry).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile/education/:edu_id
pub async fn education_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> ApiResult<Profile> {
    let edu_id = parse_id(&edu_id, Resource::Education)?;
    let profile = state
        .profiles()
        .remove_section(auth.user_id, SectionKind::Education, edu_id)
        .await?;
    Ok(ApiResponse::success(profile))
}
