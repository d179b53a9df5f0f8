// handlers/mod.rs - two handler tiers
//
// Public (no auth) and Protected (JWT auth). The protected tier runs behind
// `jwt_auth_middleware` and reads the caller from the `AuthUser` extension.
pub mod protected;
pub mod public;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::{CoreError, Resource};
use crate::error::ApiError;

/// Body for operations that only confirm a removal
#[derive(Debug, Serialize)]
pub struct Message {
    pub msg: &'static str,
}

impl Message {
    pub fn new(msg: &'static str) -> Self {
        Self { msg }
    }
}

/// Path identifiers that do not parse cannot name an existing document
pub(crate) fn parse_id(raw: &str, resource: Resource) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| CoreError::NotFound(resource).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_id("not-a-uuid", Resource::Post).unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Post not found");
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), Resource::Post).unwrap(), id);
    }
}
