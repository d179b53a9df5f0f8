use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::engine::CoreError;
use crate::error::ApiError;

/// Caller identity extracted from a verified token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    let token = match extract_jwt_from_headers(&headers) {
        Ok(token) => token,
        Err(msg) => {
            debug!("Missing token: {}", msg);
            return ApiError::from(CoreError::Unauthenticated).into_response();
        }
    };

    let claims = match validate_jwt(&token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Rejected token: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    next.run(request).await
}

/// Bearer token from `Authorization`, or the raw token in `x-auth-token`
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    if let Some(auth_header) = headers.get("authorization") {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header format".to_string())?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            Some(_) => Err("Empty JWT token".to_string()),
            None => Err("Authorization header must use Bearer token format".to_string()),
        };
    }

    match headers.get("x-auth-token").and_then(|v| v.to_str().ok()) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err("No token, authorization denied".to_string()),
    }
}
