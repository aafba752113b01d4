//! PostgreSQL-backed `RoomRepository` implementation using Diesel ORM.
//!
//! Rooms follow the same single-statement guarded mutations as posts.
//! Deleting a room cascades to `room_members` only; posts keep their
//! `room_id` reference.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EntityRepositoryError, RoomRepository, VersionedRepository};
use crate::domain::{
    JoinOutcome, MemberId, MembershipStatus, Room, RoomChanges, RoomId, RoomMembership, Version,
};

use super::diesel_helpers::{
    collect_rows, guard_version, is_foreign_key_violation, map_diesel_error, map_pool_error,
    version_for_db,
};
use super::models::{MembershipRow, NewRoomRow, RoomChangeset, RoomRow};
use super::pool::DbPool;
use super::schema::{room_members, rooms};

/// Diesel-backed implementation of the room repository port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_room(row: RoomRow) -> Result<Room, EntityRepositoryError> {
    Room::try_from(row).map_err(EntityRepositoryError::query)
}

fn row_to_membership(row: MembershipRow) -> Result<RoomMembership, EntityRepositoryError> {
    RoomMembership::try_from(row).map_err(EntityRepositoryError::query)
}

#[async_trait]
impl VersionedRepository for DieselRoomRepository {
    type Id = RoomId;
    type Entity = Room;
    type Changes = RoomChanges;

    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = rooms::table
            .filter(rooms::id.eq(id.as_uuid()))
            .select(RoomRow::as_select())
            .first::<RoomRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_room).transpose()
    }

    async fn update_if_version(
        &self,
        id: &RoomId,
        expected: Version,
        changes: &RoomChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Room>, EntityRepositoryError> {
        let Some(expected) = guard_version(expected) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            rooms::table
                .filter(rooms::id.eq(id.as_uuid()))
                .filter(rooms::version.eq(expected)),
        )
        .set((
            RoomChangeset::from(changes),
            rooms::version.eq(rooms::version + 1),
            rooms::updated_at.eq(updated_at),
        ))
        .returning(RoomRow::as_returning())
        .get_result::<RoomRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_room).transpose()
    }

    async fn delete_if_version(
        &self,
        id: &RoomId,
        expected: Version,
    ) -> Result<bool, EntityRepositoryError> {
        let Some(expected) = guard_version(expected) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            rooms::table
                .filter(rooms::id.eq(id.as_uuid()))
                .filter(rooms::version.eq(expected)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted == 1)
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRoomRow {
            id: *room.id.as_uuid(),
            title: &room.title,
            description: &room.description,
            status: &room.status,
            category_id: *room.category_id.as_uuid(),
            room_owner_id: *room.room_owner_id.as_uuid(),
            created_by: &room.created_by,
            version: version_for_db(room.version)?,
            created_at: room.created_at,
            updated_at: room.updated_at,
        };

        diesel::insert_into(rooms::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Room>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoomRow> = rooms::table
            .order((rooms::created_at.desc(), rooms::id.desc()))
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(rows)
    }

    async fn request_membership(
        &self,
        membership: &RoomMembership,
    ) -> Result<Option<JoinOutcome>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(room_members::table)
            .values(&MembershipRow::from(membership))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await;

        match inserted {
            Ok(0) => {}
            Ok(_) => return Ok(Some(JoinOutcome::Requested(membership.clone()))),
            Err(err) if is_foreign_key_violation(&err) => return Ok(None),
            Err(err) => return Err(map_diesel_error(err)),
        }

        // The pair already exists; report what is stored. A concurrent room
        // delete may have removed it since, which reads as a missing room.
        let existing = room_members::table
            .filter(room_members::room_id.eq(membership.room_id.as_uuid()))
            .filter(room_members::member_id.eq(membership.member_id.as_uuid()))
            .select(MembershipRow::as_select())
            .first::<MembershipRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        existing
            .map(|row| row_to_membership(row).map(JoinOutcome::AlreadyMember))
            .transpose()
    }

    async fn set_membership_status(
        &self,
        room_id: &RoomId,
        member_id: &MemberId,
        status: MembershipStatus,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<RoomMembership>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            room_members::table
                .filter(room_members::room_id.eq(room_id.as_uuid()))
                .filter(room_members::member_id.eq(member_id.as_uuid())),
        )
        .set((
            room_members::status.eq(status.as_str()),
            room_members::decided_at.eq(Some(decided_at)),
        ))
        .returning(MembershipRow::as_returning())
        .get_result::<MembershipRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_membership).transpose()
    }

    async fn memberships(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<RoomMembership>, EntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MembershipRow> = room_members::table
            .filter(room_members::room_id.eq(room_id.as_uuid()))
            .order((room_members::joined_at.asc(), room_members::member_id.asc()))
            .select(MembershipRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(rows)
    }
}
