// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here receives `Extension<AuthUser>` injected by
// `jwt_auth_middleware`; the caller id is never taken from the body or path.
pub mod auth;
pub mod posts;
pub mod profile;

pub use auth::current_user;
pub use posts::*;
pub use profile::*;
