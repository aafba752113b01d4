//! Request and response shapes shared by the post and room handlers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Actor, ActorKind, Error, Version};
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, parse_uuid, require_version,
};

/// A member or room owner, as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorBody {
    /// `member` or `roomOwner`.
    #[schema(example = "member")]
    pub kind: Option<String>,
    #[schema(format = "uuid")]
    pub id: Option<String>,
}

impl From<Actor> for ActorBody {
    fn from(actor: Actor) -> Self {
        let kind = match actor.kind() {
            ActorKind::Member => "member",
            ActorKind::RoomOwner => "roomOwner",
        };
        Self {
            kind: Some(kind.to_owned()),
            id: Some(actor.id().to_string()),
        }
    }
}

/// Parse a required actor field.
pub(crate) fn parse_actor(body: Option<ActorBody>, field: FieldName) -> Result<Actor, Error> {
    let body = body.ok_or_else(|| missing_field_error(field))?;
    let kind_raw = body.kind.ok_or_else(|| missing_field_error(field))?;
    let id_raw = body.id.ok_or_else(|| missing_field_error(field))?;

    let kind: ActorKind = kind_raw
        .parse()
        .map_err(|_| invalid_value_error(field, &kind_raw, "member or roomOwner"))?;
    let id: Uuid = parse_uuid(&id_raw, field)?;
    Ok(Actor::from_parts(kind, id))
}

/// Query string carrying the expected version of a delete.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VersionQuery {
    /// Version the caller last observed.
    pub version: Option<u32>,
}

impl VersionQuery {
    pub(crate) fn expected(&self) -> Result<Version, Error> {
        require_version(self.version)
    }
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "deleted")]
    pub status: String,
    #[schema(format = "uuid")]
    pub id: String,
}

impl DeletedResponse {
    pub(crate) fn for_id(id: impl ToString) -> Self {
        Self {
            status: "deleted".to_owned(),
            id: id.to_string(),
        }
    }
}
