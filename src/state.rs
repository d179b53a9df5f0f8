use std::sync::Arc;

use crate::database::DocumentStore;
use crate::services::{GithubClient, PostService, ProfileService, UserService};

/// Shared handler state. The store handle is opened once at startup and
/// passed to every request from here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub github: GithubClient,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, github: GithubClient) -> Self {
        Self { store, github }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.store.clone())
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.store.clone())
    }
}
