use super::helpers::{
    create_prompt, expect_status, get_request, json_request, read_json, send, sign_up,
    sign_up_with_role, spawn_app,
};
use axum::http::StatusCode;
use promptly_api::domain::user::{repository::UserRepository, role::Role};
use serde_json::{Value, json};

#[tokio::test]
async fn two_reports_then_moderator_delete_flags_author_once() {
    let app = spawn_app();
    let author = sign_up(&app, "author_a").await;
    let reporter_b = sign_up(&app, "reporter_b").await;
    let reporter_c = sign_up(&app, "reporter_c").await;
    let moderator = sign_up_with_role(&app, "mod_m", Role::Moderator).await;

    let prompt_id = create_prompt(&app, &author, "Reported prompt").await;

    for (reporter, expected) in [
        (&reporter_b, StatusCode::CREATED),
        (&reporter_c, StatusCode::OK),
    ] {
        let req = json_request(
            "POST",
            "/api/reports/submit",
            Some(&reporter.token),
            json!({ "target_id": prompt_id, "target_type": "prompt", "reason": "Spam" }),
        );
        expect_status(send(&app.app, req).await, expected).await;
    }

    let list = get_request("/api/reports/all", Some(&moderator.token));
    let res = expect_status(send(&app.app, list).await, StatusCode::OK).await;
    let reports: Vec<Value> = read_json(res).await;
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report["report_count"], 2);
    assert_eq!(report["target_type"], "prompt");
    let entries = report["entries"].as_array().unwrap();
    let reporters: Vec<String> = entries
        .iter()
        .map(|e| e["reporter_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        reporters,
        vec![reporter_b.id.to_string(), reporter_c.id.to_string()]
    );
    assert!(entries.iter().all(|e| e["reason"] == "Spam"));
    assert_eq!(entries[0]["reporter"]["username"], "reporter_b");
    assert_eq!(report["content"]["kind"], "prompt");
    let report_id = report["id"].as_str().unwrap().to_string();

    let delete = json_request(
        "DELETE",
        "/api/reports/delete",
        Some(&moderator.token),
        json!({ "report_id": report_id, "target_id": prompt_id, "target_type": "prompt" }),
    );
    let res = expect_status(send(&app.app, delete).await, StatusCode::OK).await;
    let outcome: Value = read_json(res).await;
    assert_eq!(outcome["flagged_user_id"], author.id.to_string());

    let gone = get_request(&format!("/api/prompts/{}", prompt_id), None);
    expect_status(send(&app.app, gone).await, StatusCode::NOT_FOUND).await;

    let flagged = app.users.find_by_id(author.id).await.unwrap().unwrap();
    assert_eq!(flagged.flag_count, 1);

    let list = get_request("/api/reports/all", Some(&moderator.token));
    let res = expect_status(send(&app.app, list).await, StatusCode::OK).await;
    let reports: Vec<Value> = read_json(res).await;
    assert!(reports.is_empty());
}

#[tokio::test]
async fn same_user_reporting_twice_is_conflict() {
    let app = spawn_app();
    let author = sign_up(&app, "author").await;
    let reporter = sign_up(&app, "reporter").await;
    let prompt_id = create_prompt(&app, &author, "Once").await;

    let body = json!({ "target_id": prompt_id, "target_type": "prompt", "reason": "Spam" });
    let first = json_request("POST", "/api/reports/submit", Some(&reporter.token), body.clone());
    expect_status(send(&app.app, first).await, StatusCode::CREATED).await;

    let second = json_request("POST", "/api/reports/submit", Some(&reporter.token), body);
    let res = expect_status(send(&app.app, second).await, StatusCode::CONFLICT).await;
    let error: Value = read_json(res).await;
    assert_eq!(error["error"], "You have already reported this item");
}

#[tokio::test]
async fn approve_clears_reports_without_flagging() {
    let app = spawn_app();
    let author = sign_up(&app, "author").await;
    let reporter = sign_up(&app, "reporter").await;
    let admin = sign_up_with_role(&app, "boss", Role::Admin).await;
    let prompt_id = create_prompt(&app, &author, "Fine prompt").await;

    let report = json_request(
        "POST",
        "/api/reports/submit",
        Some(&reporter.token),
        json!({ "target_id": prompt_id, "target_type": "prompt", "reason": "Meh" }),
    );
    expect_status(send(&app.app, report).await, StatusCode::CREATED).await;

    let approve = json_request(
        "POST",
        "/api/reports/approve",
        Some(&admin.token),
        json!({ "target_id": prompt_id }),
    );
    let res = expect_status(send(&app.app, approve).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["removed"], 1);

    let still_there = get_request(&format!("/api/prompts/{}", prompt_id), None);
    expect_status(send(&app.app, still_there).await, StatusCode::OK).await;
    let user = app.users.find_by_id(author.id).await.unwrap().unwrap();
    assert_eq!(user.flag_count, 0);

    let again = json_request(
        "POST",
        "/api/reports/approve",
        Some(&admin.token),
        json!({ "target_id": prompt_id }),
    );
    expect_status(send(&app.app, again).await, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn regular_users_are_denied_moderation_and_admin_routes() {
    let app = spawn_app();
    let user = sign_up(&app, "plain_user").await;

    let list = get_request("/api/reports/all", Some(&user.token));
    expect_status(send(&app.app, list).await, StatusCode::FORBIDDEN).await;

    let users = get_request("/api/admin/users", Some(&user.token));
    expect_status(send(&app.app, users).await, StatusCode::FORBIDDEN).await;

    let promote = json_request(
        "POST",
        "/api/admin/assign-role",
        Some(&user.token),
        json!({ "user_id": user.id, "role": "admin" }),
    );
    expect_status(send(&app.app, promote).await, StatusCode::FORBIDDEN).await;
    let unchanged = app.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(unchanged.role, Role::User);
}

#[tokio::test]
async fn moderators_cannot_manage_users_but_admins_can() {
    let app = spawn_app();
    let moderator = sign_up_with_role(&app, "mod_m", Role::Moderator).await;
    let admin = sign_up_with_role(&app, "boss", Role::Admin).await;
    let target = sign_up(&app, "target").await;

    let as_moderator = json_request(
        "POST",
        "/api/admin/assign-role",
        Some(&moderator.token),
        json!({ "user_id": target.id, "role": "moderator" }),
    );
    expect_status(send(&app.app, as_moderator).await, StatusCode::FORBIDDEN).await;

    let as_admin = json_request(
        "POST",
        "/api/admin/assign-role",
        Some(&admin.token),
        json!({ "user_id": target.id, "role": "moderator" }),
    );
    expect_status(send(&app.app, as_admin).await, StatusCode::OK).await;

    // New role applies to the token issued before the change
    let list = get_request("/api/reports/all", Some(&target.token));
    expect_status(send(&app.app, list).await, StatusCode::OK).await;

    let delete = json_request(
        "DELETE",
        &format!("/api/admin/delete-user/{}", target.id),
        Some(&admin.token),
        json!({}),
    );
    expect_status(send(&app.app, delete).await, StatusCode::OK).await;
    let after = get_request("/api/user/profile", Some(&target.token));
    expect_status(send(&app.app, after).await, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn staff_can_add_events_and_anyone_can_list_them() {
    let app = spawn_app();
    let user = sign_up(&app, "plain_user").await;
    let moderator = sign_up_with_role(&app, "mod_m", Role::Moderator).await;
    let body = json!({
        "title": "Prompt jam",
        "event_date": "2999-01-01",
        "event_time": "18:00",
        "organizer": "Promptly",
        "registration_link": "https://events.example/jam"
    });

    let denied = json_request("POST", "/api/events/add", Some(&user.token), body.clone());
    expect_status(send(&app.app, denied).await, StatusCode::FORBIDDEN).await;

    let added = json_request("POST", "/api/events/add", Some(&moderator.token), body);
    expect_status(send(&app.app, added).await, StatusCode::CREATED).await;

    let upcoming = get_request("/api/events/upcoming", None);
    let res = expect_status(send(&app.app, upcoming).await, StatusCode::OK).await;
    let events: Vec<Value> = read_json(res).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Prompt jam");
}
