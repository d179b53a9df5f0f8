mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

async fn create_post(app: &common::TestApp, token: &str, text: &str) -> Result<String> {
    let res = app.post("/api/posts", Some(token), json!({ "text": text })).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    Ok(res.data()["id"].as_str().unwrap_or_default().to_string())
}

fn texts(comments: &Value) -> Vec<String> {
    comments
        .as_array()
        .map(|a| a.iter().filter_map(|c| c["text"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn post_carries_author_snapshot() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Ada").await?;
    let user_id = app.user_id(&token).await?;

    let res = app.post("/api/posts", Some(&token), json!({ "text": "hello" })).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["owner"], user_id.as_str());
    assert_eq!(res.data()["displayName"], "Ada");
    assert_eq!(res.data()["likes"], json!([]));
    assert_eq!(res.data()["comments"], json!([]));
    Ok(())
}

#[tokio::test]
async fn posts_list_newest_first() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Ada").await?;
    create_post(&app, &token, "first").await?;
    create_post(&app, &token, "second").await?;

    let res = app.get("/api/posts", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(texts(res.data()), vec!["second", "first"]);
    Ok(())
}

#[tokio::test]
async fn empty_text_is_rejected() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Ada").await?;

    let res = app.post("/api/posts", Some(&token), json!({ "text": "   " })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"].get("text").is_some());
    Ok(())
}

#[tokio::test]
async fn like_and_unlike_flow() -> Result<()> {
    let app = common::TestApp::new();
    let a = app.register("A").await?;
    let b = app.register("B").await?;
    let b_id = app.user_id(&b).await?;
    let post = create_post(&app, &a, "hello").await?;

    let liked = app.put(&format!("/api/posts/like/{}", post), Some(&b), None).await?;
    assert_eq!(liked.status, StatusCode::OK);
    let likes = liked.data().as_array().cloned().unwrap_or_default();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0]["userId"], b_id.as_str());

    let again = app.put(&format!("/api/posts/like/{}", post), Some(&b), None).await?;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.body["message"], "Post already liked");

    let unliked = app.put(&format!("/api/posts/unlike/{}", post), Some(&b), None).await?;
    assert_eq!(unliked.status, StatusCode::OK);
    assert_eq!(unliked.data(), &json!([]));

    let not_yet = app.put(&format!("/api/posts/unlike/{}", post), Some(&b), None).await?;
    assert_eq!(not_yet.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_yet.body["message"], "Post has not yet been liked");
    Ok(())
}

#[tokio::test]
async fn comments_newest_first_and_author_only_removal() -> Result<()> {
    let app = common::TestApp::new();
    let owner = app.register("Owner").await?;
    let author = app.register("Author").await?;
    let post = create_post(&app, &owner, "hello").await?;

    app.post(&format!("/api/posts/comment/{}", post), Some(&author), json!({ "text": "C1" }))
        .await?;
    let res = app
        .post(&format!("/api/posts/comment/{}", post), Some(&author), json!({ "text": "C2" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(texts(res.data()), vec!["C2", "C1"]);

    let c1 = res.data()[1]["id"].as_str().unwrap_or_default().to_string();
    let path = format!("/api/posts/comment/{}/{}", post, c1);

    let denied = app.delete(&path, Some(&owner)).await?;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);
    assert_eq!(denied.body["message"], "User not authorized");

    let removed = app.delete(&path, Some(&author)).await?;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(texts(removed.data()), vec!["C2"]);

    let gone = app.delete(&path, Some(&author)).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], "Comment not found");
    Ok(())
}

#[tokio::test]
async fn only_owner_deletes_post() -> Result<()> {
    let app = common::TestApp::new();
    let owner = app.register("Owner").await?;
    let other = app.register("Other").await?;
    let post = create_post(&app, &owner, "hello").await?;
    let path = format!("/api/posts/{}", post);

    let denied = app.delete(&path, Some(&other)).await?;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let removed = app.delete(&path, Some(&owner)).await?;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.data()["msg"], "Post removed");

    let missing = app.get(&path, Some(&owner)).await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Ada").await?;

    let malformed = app.get("/api/posts/not-an-id", Some(&token)).await?;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
    assert_eq!(malformed.body["message"], "Post not found");

    let unknown = app
        .put("/api/posts/like/00000000-0000-4000-8000-000000000000", Some(&token), None)
        .await?;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    Ok(())
}
