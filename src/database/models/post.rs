use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::collection::{Element, Embedded};

/// A post with its likes and comments stored inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub owner: Uuid,
    pub text: String,
    /// Author name captured when the post was created
    pub display_name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Embedded<Like>,
    #[serde(default)]
    pub comments: Embedded<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(owner: Uuid, text: String, display_name: String, avatar: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            text,
            display_name,
            avatar,
            likes: Embedded::new(),
            comments: Embedded::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl Like {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
        }
    }
}

impl Element for Like {
    fn element_id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub display_name: String,
    pub avatar: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(user_id: Uuid, text: String, display_name: String, avatar: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            display_name,
            avatar,
            user_id,
            created_at: Utc::now(),
        }
    }
}

impl Element for Comment {
    fn element_id(&self) -> Uuid {
        self.id
    }
}
