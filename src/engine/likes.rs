use uuid::Uuid;

use super::error::CoreError;
use crate::database::models::{Like, Post};

/// Per (post, user) like state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    NotLiked,
    Liked,
}

pub fn like_state(post: &Post, user_id: Uuid) -> LikeState {
    if post.likes.contains_where(|l| l.user_id == user_id) {
        LikeState::Liked
    } else {
        LikeState::NotLiked
    }
}

/// NotLiked -> Liked. The post is left untouched on `AlreadyLiked`.
pub fn like(post: &mut Post, user_id: Uuid) -> Result<(), CoreError> {
    match like_state(post, user_id) {
        LikeState::Liked => Err(CoreError::AlreadyLiked),
        LikeState::NotLiked => {
            post.likes.insert_head(Like::new(user_id));
            Ok(())
        }
    }
}

/// Liked -> NotLiked, removing exactly the caller's like element
pub fn unlike(post: &mut Post, user_id: Uuid) -> Result<(), CoreError> {
    let like_id = post
        .likes
        .find_by(|l| l.user_id == user_id)
        .map(|l| l.id)
        .ok_or(CoreError::NotYetLiked)?;

    post.likes.remove_by_id(like_id);
    Ok(())
}
