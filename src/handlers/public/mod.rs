// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account registration, token acquisition and read-only profile browsing.
pub mod profile;
pub mod users;

pub use profile::{github_repos, profile_by_user, profile_list};
pub use users::{login, register};
