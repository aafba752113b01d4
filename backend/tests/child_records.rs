//! Likes, comments, and memberships hang off versioned entities without
//! bumping their versions.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::json;

use common::{init_app, member_actor, open_room, publish_post, send};

#[rstest]
#[actix_web::test]
async fn likes_and_comments_leave_the_post_version_alone() {
    let app = init_app().await;
    let room_id = open_room(&app).await;
    let post_id = publish_post(&app, &room_id).await;
    let actor = member_actor();

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/likes"))
            .set_json(json!({"actor": actor})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"recorded": true, "likeCount": 1}));

    let (_, body) = send(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/likes"))
            .set_json(json!({"actor": actor})),
    )
    .await;
    assert_eq!(body, json!({"recorded": false, "likeCount": 1}));

    let (status, comment) = send(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .set_json(json!({"actor": actor, "body": "Lovely beans"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["body"], "Lovely beans");

    let (_, comments) = send(
        &app,
        TestRequest::get().uri(&format!("/api/v1/posts/{post_id}/comments")),
    )
    .await;
    assert_eq!(comments.as_array().map(Vec::len), Some(1));

    let (_, post) = send(&app, TestRequest::get().uri(&format!("/api/v1/posts/{post_id}"))).await;
    assert_eq!(post["version"], 1);

    // The original version still guards the post.
    let (status, _) = send(
        &app,
        TestRequest::put()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .set_json(json!({"version": 1, "title": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn likes_on_missing_posts_are_not_found() {
    let app = init_app().await;

    let (status, _) = send(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{}/likes", uuid::Uuid::new_v4()))
            .set_json(json!({"actor": member_actor()})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn membership_lifecycle_leaves_the_room_version_alone() {
    let app = init_app().await;
    let room_id = open_room(&app).await;
    let member_id = uuid::Uuid::new_v4().to_string();
    let members = format!("/api/v1/rooms/{room_id}/members");

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri(&members)
            .set_json(json!({"memberId": member_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "JoinRequested");

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri(&members)
            .set_json(json!({"memberId": member_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"]["code"], "membership_exists");

    let (status, body) = send(
        &app,
        TestRequest::post().uri(&format!("{members}/{member_id}/accept")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");
    assert!(body["decidedAt"].is_string());

    let (_, listing) = send(&app, TestRequest::get().uri(&members)).await;
    assert_eq!(listing.as_array().map(Vec::len), Some(1));

    let (_, room) = send(&app, TestRequest::get().uri(&format!("/api/v1/rooms/{room_id}"))).await;
    assert_eq!(room["version"], 1);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_room_leaves_its_posts() {
    let app = init_app().await;
    let room_id = open_room(&app).await;
    let post_id = publish_post(&app, &room_id).await;

    let (status, _) = send(
        &app,
        TestRequest::delete().uri(&format!("/api/v1/rooms/{room_id}?version=1")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, post) = send(&app, TestRequest::get().uri(&format!("/api/v1/posts/{post_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["roomId"], room_id);

    let (status, _) = send(&app, TestRequest::get().uri(&format!("/api/v1/rooms/{room_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
