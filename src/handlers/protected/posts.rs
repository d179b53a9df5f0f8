use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::{Comment, Like, Post};
use crate::engine::{Embedded, Resource};
use crate::handlers::{parse_id, Message};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::Validator;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

fn required_text(payload: Result<Json<TextRequest>, JsonRejection>) -> Result<String, crate::error::ApiError> {
    let Json(body) = payload?;
    let mut v = Validator::new();
    match v.required("text", body.text, "Text is required") {
        Some(text) => Ok(text),
        None => Err(v.into_error().into()),
    }
}

/// POST /api/posts - Create a post authored by the caller
pub async fn post_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> ApiResult<Post> {
    let text = required_text(payload)?;
    let post = state.posts().create_post(auth.user_id, text).await?;
    Ok(ApiResponse::created(post))
}

/// GET /api/posts - All posts, newest first
pub async fn post_list(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let posts = state.posts().list_posts().await?;
    Ok(ApiResponse::success(posts))
}

/// GET /api/posts/:id
pub async fn post_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Post> {
    let id = parse_id(&id, Resource::Post)?;
    let post = state.posts().get_post(auth.user_id, id).await?;
    Ok(ApiResponse::success(post))
}

/// DELETE /api/posts/:id - Only the post's owner may delete it
pub async fn post_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    let id = parse_id(&id, Resource::Post)?;
    state.posts().delete_post(auth.user_id, id).await?;
    Ok(ApiResponse::success(Message::new("Post removed")))
}

/// PUT /api/posts/like/:id - Returns the post's likes after the change
pub async fn post_like(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Embedded<Like>> {
    let id = parse_id(&id, Resource::Post)?;
    let likes = state.posts().like(auth.user_id, id).await?;
    Ok(ApiResponse::success(likes))
}

/// PUT /api/posts/unlike/:id
pub async fn post_unlike(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Embedded<Like>> {
    let id = parse_id(&id, Resource::Post)?;
    let likes = state.posts().unlike(auth.user_id, id).await?;
    Ok(ApiResponse::success(likes))
}

/// POST /api/posts/comment/:id - Returns the post's comments, newest first
pub async fn comment_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> ApiResult<Embedded<Comment>> {
    let id = parse_id(&id, Resource::Post)?;
    let text = required_text(payload)?;
    let comments = state.posts().add_comment(auth.user_id, id, text).await?;
    Ok(ApiResponse::success(comments))
}

/// DELETE /api/posts/comment/:id/:comment_id - Only the comment's author may remove it
pub async fn comment_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Embedded<Comment>> {
    let id = parse_id(&id, Resource::Post)?;
    let comment_id = parse_id(&comment_id, Resource::Comment)?;
    let comments = state.posts().delete_comment(auth.user_id, id, comment_id).await?;
    Ok(ApiResponse::success(comments))
}
