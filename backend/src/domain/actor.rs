//! Community participants that author posts, likes, and comments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MemberId, RoomOwnerId};

/// A member or room owner acting in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Actor {
    /// A regular community member.
    Member(MemberId),
    /// The owner of a room.
    RoomOwner(RoomOwnerId),
}

/// Discriminant of an [`Actor`], stored alongside the actor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// See [`Actor::Member`].
    Member,
    /// See [`Actor::RoomOwner`].
    RoomOwner,
}

impl ActorKind {
    /// Returns the database string representation.
    ///
    /// # Examples
    /// ```
    /// # use agora::domain::ActorKind;
    /// assert_eq!(ActorKind::RoomOwner.as_str(), "room_owner");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::RoomOwner => "room_owner",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown actor kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown actor kind: {input}")]
pub struct ParseActorKindError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for ActorKind {
    type Err = ParseActorKindError;

    /// Accepts both the storage form and the camel-case API form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "room_owner" | "roomOwner" => Ok(Self::RoomOwner),
            other => Err(ParseActorKindError {
                input: other.to_owned(),
            }),
        }
    }
}

impl Actor {
    /// Rebuild an actor from its stored parts.
    #[must_use]
    pub fn from_parts(kind: ActorKind, id: Uuid) -> Self {
        match kind {
            ActorKind::Member => Self::Member(MemberId::from_uuid(id)),
            ActorKind::RoomOwner => Self::RoomOwner(RoomOwnerId::from_uuid(id)),
        }
    }

    /// Kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        match self {
            Self::Member(_) => ActorKind::Member,
            Self::RoomOwner(_) => ActorKind::RoomOwner,
        }
    }

    /// Underlying identifier regardless of kind.
    #[must_use]
    pub const fn id(&self) -> &Uuid {
        match self {
            Self::Member(id) => id.as_uuid(),
            Self::RoomOwner(id) => id.as_uuid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ActorKind::Member)]
    #[case(ActorKind::RoomOwner)]
    fn parts_rebuild_the_same_actor(#[case] kind: ActorKind) {
        let id = Uuid::new_v4();
        let actor = Actor::from_parts(kind, id);
        assert_eq!(actor.kind(), kind);
        assert_eq!(actor.id(), &id);
    }

    #[rstest]
    fn kind_parse_rejects_unknown_values() {
        let err = "admin".parse::<ActorKind>().expect_err("admin is not an actor kind");
        assert_eq!(err.input, "admin");
    }
}
