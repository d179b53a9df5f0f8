use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::models::{Comment, Like, Post, User};
use crate::database::DocumentStore;
use crate::engine::collection;
use crate::engine::gate::{authorize, PostAction};
use crate::engine::likes;
use crate::engine::{CoreError, CoreResult, Embedded, Resource};

/// Posts and their embedded likes and comments.
///
/// Every mutation is one load, an in-memory change, and one save of the
/// whole post. Checks run existence first, then the ownership gate, then
/// like-state checks.
pub struct PostService {
    store: Arc<dyn DocumentStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn load(&self, id: Uuid) -> CoreResult<Post> {
        self.store
            .load_post(id)
            .await?
            .ok_or(CoreError::NotFound(Resource::Post))
    }

    async fn caller(&self, caller: Uuid) -> CoreResult<User> {
        self.store
            .load_user(caller)
            .await?
            .ok_or(CoreError::NotFound(Resource::User))
    }

    /// Name and avatar are snapshotted from the author's account now and
    /// never re-synced.
    pub async fn create_post(&self, caller: Uuid, text: String) -> CoreResult<Post> {
        let author = self.caller(caller).await?;
        let post = Post::new(caller, text, author.name, author.avatar);

        self.store.save_post(&post).await?;
        info!("User {} created post {}", caller, post.id);
        Ok(post)
    }

    pub async fn list_posts(&self) -> CoreResult<Vec<Post>> {
        Ok(self.store.list_posts().await?)
    }

    pub async fn get_post(&self, caller: Uuid, id: Uuid) -> CoreResult<Post> {
        let post = self.load(id).await?;
        authorize(caller, &post, PostAction::Read).into_result()?;
        Ok(post)
    }

    pub async fn delete_post(&self, caller: Uuid, id: Uuid) -> CoreResult<()> {
        let post = self.load(id).await?;
        authorize(caller, &post, PostAction::Delete).into_result()?;

        if !self.store.delete_post(post.id).await? {
            return Err(CoreError::NotFound(Resource::Post));
        }
        info!("User {} deleted post {}", caller, post.id);
        Ok(())
    }

    pub async fn like(&self, caller: Uuid, id: Uuid) -> CoreResult<Embedded<Like>> {
        let mut post = self.load(id).await?;
        authorize(caller, &post, PostAction::Like).into_result()?;
        likes::like(&mut post, caller)?;

        self.store.save_post(&post).await?;
        info!("User {} liked post {}", caller, post.id);
        Ok(post.likes)
    }

    pub async fn unlike(&self, caller: Uuid, id: Uuid) -> CoreResult<Embedded<Like>> {
        let mut post = self.load(id).await?;
        authorize(caller, &post, PostAction::Unlike).into_result()?;
        likes::unlike(&mut post, caller)?;

        self.store.save_post(&post).await?;
        info!("User {} unliked post {}", caller, post.id);
        Ok(post.likes)
    }

    pub async fn add_comment(&self, caller: Uuid, id: Uuid, text: String) -> CoreResult<Embedded<Comment>> {
        let post = self.load(id).await?;
        authorize(caller, &post, PostAction::AddComment).into_result()?;
        let author = self.caller(caller).await?;

        let comment = Comment::new(caller, text, author.name, author.avatar);
        let comment_id = comment.id;
        let post = collection::insert_head(post, |p| &mut p.comments, comment);

        self.store.save_post(&post).await?;
        info!("User {} commented {} on post {}", caller, comment_id, post.id);
        Ok(post.comments)
    }

    /// Remove the comment with `comment_id`. Only its author may do this.
    pub async fn delete_comment(&self, caller: Uuid, id: Uuid, comment_id: Uuid) -> CoreResult<Embedded<Comment>> {
        let post = self.load(id).await?;
        let comment = post
            .comments
            .find(comment_id)
            .ok_or(CoreError::NotFound(Resource::Comment))?;
        authorize(caller, &post, PostAction::RemoveComment(comment)).into_result()?;

        let post = collection::remove_by_element_id(post, |p| &mut p.comments, comment_id)
            .ok_or(CoreError::NotFound(Resource::Comment))?;

        self.store.save_post(&post).await?;
        info!("User {} removed comment {} from post {}", caller, comment_id, post.id);
        Ok(post.comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::failing::FailingWrites;
    use crate::database::{MemoryStore, StoreError};
    use chrono::Utc;

    struct Fixture {
        store: Arc<MemoryStore>,
        posts: PostService,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let posts = PostService::new(store.clone());
            Self { store, posts }
        }

        async fn user(&self, name: &str) -> Uuid {
            let user = User {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                avatar: format!("avatar-{}", name),
                password_hash: String::new(),
                created_at: Utc::now(),
            };
            self.store.save_user(&user).await.unwrap();
            user.id
        }
    }

    #[tokio::test]
    async fn like_unlike_scenario() {
        let f = Fixture::new();
        let a = f.user("A").await;
        let b = f.user("B").await;
        let post = f.posts.create_post(a, "hello".into()).await.unwrap();

        let likes = f.posts.like(b, post.id).await.unwrap();
        assert_eq!(likes.iter().map(|l| l.user_id).collect::<Vec<_>>(), vec![b]);

        assert!(matches!(f.posts.like(b, post.id).await, Err(CoreError::AlreadyLiked)));
        assert_eq!(f.store.load_post(post.id).await.unwrap().unwrap().likes, likes);

        let likes = f.posts.unlike(b, post.id).await.unwrap();
        assert!(likes.is_empty());

        assert!(matches!(f.posts.unlike(b, post.id).await, Err(CoreError::NotYetLiked)));
    }

    #[tokio::test]
    async fn post_snapshots_author_details() {
        let f = Fixture::new();
        let a = f.user("A").await;
        let post = f.posts.create_post(a, "hello".into()).await.unwrap();

        assert_eq!(post.owner, a);
        assert_eq!(post.display_name, "A");
        assert_eq!(post.avatar, "avatar-A");
    }

    #[tokio::test]
    async fn comments_are_newest_first() {
        let f = Fixture::new();
        let a = f.user("A").await;
        let post = f.posts.create_post(a, "hello".into()).await.unwrap();

        f.posts.add_comment(a, post.id, "C1".into()).await.unwrap();
        let comments = f.posts.add_comment(a, post.id, "C2".into()).await.unwrap();

        let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["C2", "C1"]);
    }

    #[tokio::test]
    async fn deletes_the_requested_comment_not_the_callers_first() {
        let f = Fixture::new();
        let a = f.user("A").await;
        let post = f.posts.create_post(a, "hello".into()).await.unwrap();

        f.posts.add_comment(a, post.id, "first".into()).await.unwrap();
        let comments = f.posts.add_comment(a, post.id, "second".into()).await.unwrap();
        let older = comments.iter().find(|c| c.text == "first").unwrap().id;

        let comments = f.posts.delete_comment(a, post.id, older).await.unwrap();
        let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["second"]);
    }

    #[tokio::test]
    async fn only_comment_author_may_remove_it() {
        let f = Fixture::new();
        let owner = f.user("Owner").await;
        let author = f.user("Author").await;
        let stranger = f.user("Stranger").await;
        let post = f.posts.create_post(owner, "hello".into()).await.unwrap();
        let comments = f.posts.add_comment(author, post.id, "mine".into()).await.unwrap();
        let comment_id = comments.as_slice()[0].id;

        assert!(matches!(
            f.posts.delete_comment(stranger, post.id, comment_id).await,
            Err(CoreError::Unauthorized)
        ));
        assert!(matches!(
            f.posts.delete_comment(owner, post.id, comment_id).await,
            Err(CoreError::Unauthorized)
        ));
        assert!(f.posts.delete_comment(author, post.id, comment_id).await.is_ok());
    }

    #[tokio::test]
    async fn not_found_precedes_unauthorized() {
        let f = Fixture::new();
        let owner = f.user("Owner").await;
        let stranger = f.user("Stranger").await;
        let post = f.posts.create_post(owner, "hello".into()).await.unwrap();

        assert!(matches!(
            f.posts.delete_post(stranger, Uuid::new_v4()).await,
            Err(CoreError::NotFound(Resource::Post))
        ));
        assert!(matches!(
            f.posts.delete_comment(stranger, post.id, Uuid::new_v4()).await,
            Err(CoreError::NotFound(Resource::Comment))
        ));
        assert!(matches!(
            f.posts.delete_post(stranger, post.id).await,
            Err(CoreError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn owner_deletes_post() {
        let f = Fixture::new();
        let owner = f.user("Owner").await;
        let post = f.posts.create_post(owner, "hello".into()).await.unwrap();

        f.posts.delete_post(owner, post.id).await.unwrap();
        assert!(matches!(
            f.posts.get_post(owner, post.id).await,
            Err(CoreError::NotFound(Resource::Post))
        ));
    }

    #[tokio::test]
    async fn failed_save_leaves_collections_untouched() {
        let f = Fixture::new();
        let a = f.user("A").await;
        let b = f.user("B").await;
        let post = f.posts.create_post(a, "hello".into()).await.unwrap();
        f.posts.like(a, post.id).await.unwrap();
        let before = f.store.load_post(post.id).await.unwrap().unwrap();

        let broken = PostService::new(Arc::new(FailingWrites::new(f.store.clone())));
        assert!(matches!(
            broken.like(b, post.id).await,
            Err(CoreError::Store(StoreError::ConnectionError(_)))
        ));
        assert!(matches!(
            broken.add_comment(b, post.id, "hi".into()).await,
            Err(CoreError::Store(_))
        ));

        let after = f.store.load_post(post.id).await.unwrap().unwrap();
        assert_eq!(after.likes, before.likes);
        assert_eq!(after.comments, before.comments);
        assert_eq!(after.likes.len(), 1);
        assert!(after.comments.is_empty());
    }
}
