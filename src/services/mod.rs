pub mod github;
pub mod post_service;
pub mod profile_service;
pub mod user_service;

pub use github::{GithubClient, GithubError};
pub use post_service::PostService;
pub use profile_service::{ProfileService, ProfileView};
pub use user_service::UserService;
