use axum::{extract::State, Extension};

use crate::database::models::UserView;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/auth - The authenticated caller, without the password hash
pub async fn current_user(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<UserView> {
    let user = state.users().current_user(auth.user_id).await?;
    Ok(ApiResponse::success(UserView::from(&user)))
}
