//! Tests for the room service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::test_support::{MockRoomStore, fixture_clock, fixture_timestamp};
use crate::domain::{CategoryId, ErrorCode, MembershipStatus, RoomChanges, RoomOwnerId};

fn make_service(repo: MockRoomStore) -> RoomService<MockRoomStore> {
    RoomService::new(Arc::new(repo), fixture_clock())
}

#[fixture]
fn room() -> Room {
    Room::open(
        RoomId::random(),
        NewRoom {
            title: "A".to_owned(),
            description: String::new(),
            status: None,
            category_id: CategoryId::random(),
            room_owner_id: RoomOwnerId::random(),
        },
        fixture_timestamp(),
    )
}

#[rstest]
#[tokio::test]
async fn update_reassigns_owner_through_gate(room: Room) {
    let owner = RoomOwnerId::random();
    let updated = Room {
        room_owner_id: owner,
        version: Version::new(2),
        ..room.clone()
    };
    let returned = updated.clone();
    let mut repo = MockRoomStore::new();
    repo.expect_update_if_version()
        .withf(move |_, expected, changes, _| {
            *expected == Version::INITIAL && changes.room_owner_id == Some(owner)
        })
        .times(1)
        .return_once(move |_, _, _, _| Ok(Some(returned)));

    let result = make_service(repo)
        .update(UpdateRoomRequest {
            id: room.id,
            expected_version: Version::INITIAL,
            changes: RoomChanges {
                room_owner_id: Some(owner),
                ..RoomChanges::default()
            },
        })
        .await
        .expect("update succeeds");

    assert_eq!(result, updated);
}

#[rstest]
#[tokio::test]
async fn stale_delete_reports_current_version(room: Room) {
    let current = Room {
        version: Version::new(3),
        ..room.clone()
    };
    let mut repo = MockRoomStore::new();
    repo.expect_delete_if_version()
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(current)));

    let error = make_service(repo)
        .delete(room.id, Version::new(2))
        .await
        .expect_err("stale delete");

    assert_eq!(error.code(), ErrorCode::Conflict);
    let details = error.details().expect("conflict details");
    assert_eq!(details["currentVersion"], 3);
    assert_eq!(details["expectedVersion"], 2);
}

#[rstest]
#[tokio::test]
async fn membership_request_on_missing_room_is_not_found() {
    let mut repo = MockRoomStore::new();
    repo.expect_request_membership()
        .times(1)
        .return_once(|_| Ok(None));

    let error = make_service(repo)
        .request_membership(RoomId::random(), MemberId::random())
        .await
        .expect_err("missing room");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn duplicate_membership_request_conflicts() {
    let room_id = RoomId::random();
    let member_id = MemberId::random();
    let existing = RoomMembership {
        status: MembershipStatus::Blocked,
        ..RoomMembership::request(room_id, member_id, fixture_timestamp())
    };
    let mut repo = MockRoomStore::new();
    repo.expect_request_membership()
        .times(1)
        .return_once(move |_| Ok(Some(JoinOutcome::AlreadyMember(existing))));

    let error = make_service(repo)
        .request_membership(room_id, member_id)
        .await
        .expect_err("duplicate request");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().map(|details| details["status"].clone()),
        Some(serde_json::json!("Blocked"))
    );
}

#[rstest]
#[case(MembershipDecision::Accept, MembershipStatus::Accepted)]
#[case(MembershipDecision::Reject, MembershipStatus::Rejected)]
#[case(MembershipDecision::Block, MembershipStatus::Blocked)]
#[case(MembershipDecision::Unblock, MembershipStatus::Accepted)]
#[tokio::test]
async fn decisions_store_resulting_status(
    #[case] decision: MembershipDecision,
    #[case] expected: MembershipStatus,
) {
    let room_id = RoomId::random();
    let member_id = MemberId::random();
    let mut repo = MockRoomStore::new();
    repo.expect_set_membership_status()
        .withf(move |_, _, status, decided_at| {
            *status == expected && *decided_at == fixture_timestamp()
        })
        .times(1)
        .return_once(move |room, member, status, decided_at| {
            Ok(Some(RoomMembership {
                room_id: *room,
                member_id: *member,
                status,
                joined_at: decided_at,
                decided_at: Some(decided_at),
            }))
        });
    repo.expect_update_if_version().times(0);

    let membership = make_service(repo)
        .decide_membership(room_id, member_id, decision)
        .await
        .expect("decision applied");

    assert_eq!(membership.status, expected);
}

#[rstest]
#[tokio::test]
async fn decision_without_membership_is_not_found() {
    let mut repo = MockRoomStore::new();
    repo.expect_set_membership_status()
        .times(1)
        .return_once(|_, _, _, _| Ok(None));

    let error = make_service(repo)
        .decide_membership(RoomId::random(), MemberId::random(), MembershipDecision::Accept)
        .await
        .expect_err("no membership");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
