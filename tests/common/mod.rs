#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use devconnect_api::app::app;
use devconnect_api::config;
use devconnect_api::database::MemoryStore;
use devconnect_api::services::GithubClient;
use devconnect_api::state::AppState;

/// The full router over a fresh in-memory store
pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            GithubClient::new(config::config().github.clone()).expect("GitHub client"),
        );
        Self { router: app(state) }
    }

    pub async fn request(&self, method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        self.request(Method::PUT, path, token, body).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::DELETE, path, token, None).await
    }

    /// Register an account and return its bearer token
    pub async fn register(&self, name: &str) -> Result<String> {
        let res = self
            .post(
                "/api/users",
                None,
                json!({
                    "name": name,
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "password": "secret123"
                }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "register failed: {}", res.body);

        res.data()["token"]
            .as_str()
            .map(str::to_string)
            .context("register response has no token")
    }

    /// User id of the token's owner
    pub async fn user_id(&self, token: &str) -> Result<String> {
        let res = self.get("/api/auth", Some(token)).await?;
        res.data()["id"]
            .as_str()
            .map(str::to_string)
            .context("current user has no id")
    }
}
