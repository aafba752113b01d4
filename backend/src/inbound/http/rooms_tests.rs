//! Tests for room HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::Version;
use crate::domain::test_support::fixture_timestamp;
use crate::domain::version_gate::{conflict_error, not_found_error};
use crate::inbound::http::test_utils::MockPorts;

#[fixture]
fn room() -> Room {
    Room::open(
        RoomId::random(),
        NewRoom {
            title: "Allotment".to_owned(),
            description: "Weekend digging".to_owned(),
            status: None,
            category_id: CategoryId::random(),
            room_owner_id: RoomOwnerId::random(),
        },
        fixture_timestamp(),
    )
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_room_at_first_version(room: Room) {
    let mut ports = MockPorts::default();
    let category_id = room.category_id;
    let returned = room.clone();
    ports
        .rooms
        .expect_create()
        .withf(move |draft| draft.category_id == category_id && draft.status.is_none())
        .times(1)
        .return_once(move |_| Ok(returned));
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/rooms")
        .set_json(json!({
            "title": "Allotment",
            "categoryId": category_id.to_string(),
            "roomOwnerId": room.room_owner_id.to_string(),
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["version"], 1);
    assert_eq!(body["status"], "Room Created");
    assert_eq!(body["categoryId"], json!(category_id.to_string()));
}

#[rstest]
#[case::missing_category(json!({"title": "A", "roomOwnerId": "00000000-0000-0000-0000-000000000001"}), "missing_field")]
#[case::bad_owner(json!({"title": "A", "categoryId": "00000000-0000-0000-0000-000000000001", "roomOwnerId": "owner"}), "invalid_uuid")]
#[case::blank_title(json!({"title": "", "categoryId": "00000000-0000-0000-0000-000000000001", "roomOwnerId": "00000000-0000-0000-0000-000000000002"}), "blank_field")]
#[actix_web::test]
async fn create_rejects_invalid_bodies(#[case] payload: Value, #[case] code: &str) {
    let mut ports = MockPorts::default();
    ports.rooms.expect_create().times(0);
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/rooms")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn get_maps_missing_room_to_not_found(room: Room) {
    let mut ports = MockPorts::default();
    let id = room.id;
    ports
        .rooms_query
        .expect_get()
        .times(1)
        .return_once(move |_| Err(not_found_error(EntityKind::Room, &id)));
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/rooms/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_parses_reference_changes(room: Room) {
    let mut ports = MockPorts::default();
    let new_category = CategoryId::random();
    let updated = Room {
        category_id: new_category,
        version: Version::new(3),
        ..room.clone()
    };
    ports
        .rooms
        .expect_update()
        .withf(move |request| {
            request.expected_version == Version::new(2)
                && request.changes.category_id == Some(new_category)
                && request.changes.title.is_none()
        })
        .times(1)
        .return_once(move |_| Ok(updated));
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/rooms/{}", room.id))
        .set_json(json!({"version": 2, "categoryId": new_category.to_string()}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["version"], 3);
}

#[rstest]
#[case::missing_version(json!({"title": "B"}), "missing_field")]
#[case::empty_changes(json!({"version": 1}), "empty_update")]
#[case::invalid_ref(json!({"version": 1, "roomOwnerId": "xyz"}), "invalid_uuid")]
#[actix_web::test]
async fn update_rejects_invalid_bodies(room: Room, #[case] payload: Value, #[case] code: &str) {
    let mut ports = MockPorts::default();
    ports.rooms.expect_update().times(0);
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/rooms/{}", room.id))
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn delete_with_stale_version_conflicts(room: Room) {
    let mut ports = MockPorts::default();
    ports.rooms.expect_delete().times(1).return_once(|_, _| {
        Err(conflict_error(
            EntityKind::Room,
            Version::new(2),
            Version::new(3),
        ))
    });
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/rooms/{}?version=2", room.id))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["currentVersion"], 3);
}

#[rstest]
#[actix_web::test]
async fn join_request_is_created(room: Room) {
    let mut ports = MockPorts::default();
    let member = MemberId::random();
    let room_id = room.id;
    ports
        .rooms
        .expect_request_membership()
        .withf(move |target, who| *target == room_id && *who == member)
        .times(1)
        .return_once(move |_, _| {
            Ok(RoomMembership::request(
                room_id,
                member,
                fixture_timestamp(),
            ))
        });
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/rooms/{room_id}/members"))
        .set_json(json!({"memberId": member.to_string()}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "JoinRequested");
    assert_eq!(body["decidedAt"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn decide_rejects_unknown_action(room: Room) {
    let mut ports = MockPorts::default();
    ports.rooms.expect_decide_membership().times(0);
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!(
            "/api/v1/rooms/{}/members/{}/promote",
            room.id,
            MemberId::random()
        ))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_value");
}

#[rstest]
#[actix_web::test]
async fn decide_forwards_parsed_decision(room: Room) {
    let mut ports = MockPorts::default();
    let member = MemberId::random();
    let room_id = room.id;
    ports
        .rooms
        .expect_decide_membership()
        .withf(|_, _, decision| *decision == MembershipDecision::Block)
        .times(1)
        .return_once(move |_, _, decision| {
            let mut membership = RoomMembership::request(room_id, member, fixture_timestamp());
            membership.status = decision.resulting_status();
            membership.decided_at = Some(fixture_timestamp());
            Ok(membership)
        });
    let app = actix_test::init_service(ports.into_app()).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/rooms/{room_id}/members/{member}/block"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "Blocked");
}
