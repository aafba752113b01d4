//! Community rooms and the membership workflow attached to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, EntityKind, MemberId, RoomId, RoomOwnerId, Version, Versioned};

/// Status assigned to rooms created without an explicit status.
pub const DEFAULT_ROOM_STATUS: &str = "Room Created";

/// Creator recorded on rooms opened through the admin routes.
pub const ROOM_CREATOR: &str = "Admin";

/// A room and its optimistic concurrency stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub title: String,
    pub description: String,
    /// Free-form lifecycle label such as `"Room Created"`.
    pub status: String,
    pub category_id: CategoryId,
    pub room_owner_id: RoomOwnerId,
    pub created_by: String,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Versioned for Room {
    const KIND: EntityKind = EntityKind::Room;

    fn version(&self) -> Version {
        self.version
    }
}

/// Fields supplied when opening a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub category_id: CategoryId,
    pub room_owner_id: RoomOwnerId,
}

impl Room {
    /// Materialise a freshly opened room at [`Version::INITIAL`].
    #[must_use]
    pub fn open(id: RoomId, draft: NewRoom, now: DateTime<Utc>) -> Self {
        let NewRoom {
            title,
            description,
            status,
            category_id,
            room_owner_id,
        } = draft;
        Self {
            id,
            title,
            description,
            status: status.unwrap_or_else(|| DEFAULT_ROOM_STATUS.to_owned()),
            category_id,
            room_owner_id,
            created_by: ROOM_CREATOR.to_owned(),
            version: Version::INITIAL,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Allow-listed room fields that a versioned update may assign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<CategoryId>,
    pub room_owner_id: Option<RoomOwnerId>,
}

impl RoomChanges {
    /// `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.category_id.is_none()
            && self.room_owner_id.is_none()
    }

    /// Assign every present field onto `room`.
    pub fn apply_to(&self, room: &mut Room) {
        if let Some(title) = &self.title {
            room.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            room.description.clone_from(description);
        }
        if let Some(status) = &self.status {
            room.status.clone_from(status);
        }
        if let Some(category_id) = self.category_id {
            room.category_id = category_id;
        }
        if let Some(room_owner_id) = self.room_owner_id {
            room.room_owner_id = room_owner_id;
        }
    }
}

/// Where a member stands in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
    JoinRequested,
    Accepted,
    Rejected,
    Blocked,
}

impl MembershipStatus {
    /// Returns the wire and database string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JoinRequested => "JoinRequested",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown membership status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown membership status: {input}")]
pub struct ParseMembershipStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for MembershipStatus {
    type Err = ParseMembershipStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JoinRequested" => Ok(Self::JoinRequested),
            "Accepted" => Ok(Self::Accepted),
            "Rejected" => Ok(Self::Rejected),
            "Blocked" => Ok(Self::Blocked),
            other => Err(ParseMembershipStatusError {
                input: other.to_owned(),
            }),
        }
    }
}

/// Decision a room owner takes on a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipDecision {
    Accept,
    Reject,
    Block,
    Unblock,
}

impl MembershipDecision {
    /// Status a membership ends in once the decision is applied.
    ///
    /// # Examples
    /// ```
    /// # use agora::domain::{MembershipDecision, MembershipStatus};
    /// assert_eq!(
    ///     MembershipDecision::Unblock.resulting_status(),
    ///     MembershipStatus::Accepted
    /// );
    /// ```
    #[must_use]
    pub const fn resulting_status(self) -> MembershipStatus {
        match self {
            Self::Accept | Self::Unblock => MembershipStatus::Accepted,
            Self::Reject => MembershipStatus::Rejected,
            Self::Block => MembershipStatus::Blocked,
        }
    }
}

/// Error returned when parsing an unknown membership decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown membership decision: {input}")]
pub struct ParseMembershipDecisionError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for MembershipDecision {
    type Err = ParseMembershipDecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            "block" => Ok(Self::Block),
            "unblock" => Ok(Self::Unblock),
            other => Err(ParseMembershipDecisionError {
                input: other.to_owned(),
            }),
        }
    }
}

/// A member's standing in one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMembership {
    pub room_id: RoomId,
    pub member_id: MemberId,
    pub status: MembershipStatus,
    pub joined_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl RoomMembership {
    /// A fresh join request.
    #[must_use]
    pub const fn request(room_id: RoomId, member_id: MemberId, now: DateTime<Utc>) -> Self {
        Self {
            room_id,
            member_id,
            status: MembershipStatus::JoinRequested,
            joined_at: now,
            decided_at: None,
        }
    }
}

/// Result of asking to join a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new membership was stored.
    Requested(RoomMembership),
    /// The member already had a membership; it is returned unchanged.
    AlreadyMember(RoomMembership),
}
