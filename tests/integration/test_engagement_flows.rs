use super::helpers::{
    create_prompt, expect_status, get_request, json_request, read_json, send, sign_up, spawn_app,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn like_twice_restores_original_state() {
    let app = spawn_app();
    let author = sign_up(&app, "author").await;
    let fan = sign_up(&app, "fan").await;
    let prompt_id = create_prompt(&app, &author, "Likeable").await;
    let uri = format!("/api/prompts/{}/like", prompt_id);

    let res = send(&app.app, json_request("POST", &uri, Some(&fan.token), json!({}))).await;
    let first: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(first, json!({ "likes": 1, "is_liked": true }));

    let res = send(&app.app, json_request("POST", &uri, Some(&fan.token), json!({}))).await;
    let second: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(second, json!({ "likes": 0, "is_liked": false }));

    let res = send(&app.app, get_request(&format!("/api/prompts/{}", prompt_id), None)).await;
    let prompt: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(prompt["likes"], 0);
    assert_eq!(prompt["liked_by"], json!([]));
}

#[tokio::test]
async fn bookmark_toggles_membership_without_touching_prompt() {
    let app = spawn_app();
    let author = sign_up(&app, "author").await;
    let reader = sign_up(&app, "reader").await;
    let prompt_id = create_prompt(&app, &author, "Keep me").await;
    let uri = format!("/api/prompts/{}/bookmark", prompt_id);

    let res = send(&app.app, json_request("POST", &uri, Some(&reader.token), json!({}))).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["is_bookmarked"], true);

    let res = send(&app.app, get_request("/api/user/bookmarks", Some(&reader.token))).await;
    let bookmarks: Vec<Value> = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0]["id"], prompt_id.to_string());
    assert_eq!(bookmarks[0]["is_bookmarked"], true);

    let res = send(&app.app, json_request("POST", &uri, Some(&reader.token), json!({}))).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["is_bookmarked"], false);

    let res = send(&app.app, get_request(&format!("/api/prompts/{}", prompt_id), None)).await;
    let prompt: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(prompt["likes"], 0);
    assert_eq!(prompt["comments_count"], 0);
}

#[tokio::test]
async fn comments_are_listed_and_counted() {
    let app = spawn_app();
    let author = sign_up(&app, "author").await;
    let commenter = sign_up(&app, "commenter").await;
    let prompt_id = create_prompt(&app, &author, "Discuss").await;

    let req = json_request(
        "POST",
        "/api/comments",
        Some(&commenter.token),
        json!({ "prompt_id": prompt_id, "text": "  Nice one  " }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::CREATED).await;
    let comment: Value = read_json(res).await;
    assert_eq!(comment["text"], "Nice one");
    assert_eq!(comment["author"]["username"], "commenter");
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let res = send(&app.app, get_request(&format!("/api/comments/{}", prompt_id), None)).await;
    let comments: Vec<Value> = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(comments.len(), 1);

    let res = send(
        &app.app,
        get_request(&format!("/api/comments/single/{}", comment_id), None),
    )
    .await;
    expect_status(res, StatusCode::OK).await;

    let res = send(&app.app, get_request(&format!("/api/prompts/{}", prompt_id), None)).await;
    let prompt: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(prompt["comments_count"], 1);
}

#[tokio::test]
async fn feed_search_and_leaderboard() {
    let app = spawn_app();
    let author = sign_up(&app, "author").await;
    create_prompt(&app, &author, "Sunset over Paris").await;
    create_prompt(&app, &author, "Robot portrait").await;

    let res = send(&app.app, get_request("/api/prompts", Some(&author.token))).await;
    let feed: Vec<Value> = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["title"], "Robot portrait");
    assert_eq!(feed[0]["author"]["username"], "author");
    assert_eq!(feed[0]["tags"], json!(["art", "test"]));

    let res = send(
        &app.app,
        get_request("/api/prompts/search?q=the%20sunset", Some(&author.token)),
    )
    .await;
    let hits: Vec<Value> = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Sunset over Paris");

    let res = send(&app.app, get_request("/api/prompts/search?q=", Some(&author.token))).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = send(&app.app, get_request("/api/user/leaderboard", Some(&author.token))).await;
    let leaders: Vec<Value> = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(leaders[0]["username"], "author");
    assert_eq!(leaders[0]["total_prompts"], 2);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = spawn_app();
    let res = send(&app.app, get_request("/api/prompts", None)).await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;

    let res = send(&app.app, get_request("/api/prompts", Some("not-a-jwt"))).await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;
}
