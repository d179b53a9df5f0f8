use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::issue_token;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::Validator;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/users - Register an account and receive a token
///
/// Expected Input:
/// ```json
/// { "name": "string", "email": "string", "password": "string (6+ chars)" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let Json(body) = payload?;

    let mut v = Validator::new();
    let name = v.required("name", body.name, "Name is required");
    let email = v.email("email", body.email, "Please include a valid email");
    let password = v.min_len(
        "password",
        body.password,
        6,
        "Please enter a password with 6 or more characters",
    );

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(v.into_error().into());
    };

    let user = state.users().register(name, email, &password).await?;
    let token = issue_token(user.id)?;

    Ok(ApiResponse::created(TokenResponse { token }))
}

/// POST /api/auth - Exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let Json(body) = payload?;

    let mut v = Validator::new();
    let email = v.email("email", body.email, "Please include a valid email");
    let password = v.required_value("password", body.password.filter(|p| !p.is_empty()), "Password is required");

    let (Some(email), Some(password)) = (email, password) else {
        return Err(v.into_error().into());
    };

    let user = state.users().login(&email, &password).await?;
    let token = issue_token(user.id)?;

    Ok(ApiResponse::success(TokenResponse { token }))
}
