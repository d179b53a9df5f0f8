use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::GithubConfig;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("No Github profile found")]
    NotFound,

    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid GitHub URL: {0}")]
    Url(#[from] url::ParseError),
}

/// GitHub usernames: alphanumerics and single hyphens, at most 39 chars
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Thin client for the public repository listing
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn repos_url(&self, username: &str) -> Result<Url, GithubError> {
        let mut url = Url::parse(&self.config.api_base)?.join(&format!("users/{}/repos", username))?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.config.repo_count.to_string())
            .append_pair("sort", "created")
            .append_pair("direction", "desc");
        Ok(url)
    }

    /// Most recently created public repositories of `username`, passed through as-is
    pub async fn latest_repos(&self, username: &str) -> Result<Vec<Value>, GithubError> {
        if !is_valid_username(username) {
            return Err(GithubError::NotFound);
        }

        let url = self.repos_url(username)?;
        debug!(url = %url, "Fetching GitHub repositories");

        let mut request = self.http.get(url).header("Accept", "application/vnd.github+json");
        if let (Some(id), Some(secret)) = (&self.config.client_id, &self.config.client_secret) {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            warn!(username = %username, status = %response.status(), "GitHub lookup failed");
            return Err(GithubError::NotFound);
        }

        Ok(response.json().await?)
    }
}
