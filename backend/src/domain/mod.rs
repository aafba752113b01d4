//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the community entities (rooms, posts, memberships) and the
//! optimistic concurrency rules that guard them. Types here are transport
//! agnostic; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and its stable category.
//! - Version / Versioned: concurrency stamp and the capability to expose it.
//! - VersionGate / GateOutcome: guarded update and delete with disambiguation.
//! - Post / Room and their change sets, plus likes, comments, memberships.
//! - PostService / RoomService: driving-port implementations.

pub mod actor;
pub mod error;
pub mod ids;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod room;
pub mod room_service;
pub mod trace_id;
pub mod version;
pub mod version_gate;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::actor::{Actor, ActorKind, ParseActorKindError};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{CategoryId, CommentId, MemberId, PostId, RoomId, RoomOwnerId};
pub use self::post::{
    LikeOutcome, LikeReceipt, NewPost, ParsePostStatusError, Post, PostChanges, PostComment, PostLike,
    PostStatus,
};
pub use self::post_service::PostService;
pub use self::room::{
    DEFAULT_ROOM_STATUS, JoinOutcome, MembershipDecision, MembershipStatus, NewRoom,
    ParseMembershipDecisionError, ParseMembershipStatusError, ROOM_CREATOR, Room, RoomChanges,
    RoomMembership,
};
pub use self::room_service::RoomService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::version::{EntityKind, Version, Versioned};
pub use self::version_gate::{GateOutcome, VersionGate};
