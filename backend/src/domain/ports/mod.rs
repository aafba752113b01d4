//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod post_command;
mod post_query;
mod post_repository;
mod room_command;
mod room_query;
mod room_repository;
mod versioned_repository;

#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{AddCommentRequest, PostCommand, UpdatePostRequest};
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_query::PostQuery;
pub use post_repository::PostRepository;
#[cfg(test)]
pub use room_command::MockRoomCommand;
pub use room_command::{RoomCommand, UpdateRoomRequest};
#[cfg(test)]
pub use room_query::MockRoomQuery;
pub use room_query::RoomQuery;
pub use room_repository::RoomRepository;
pub use versioned_repository::{EntityRepositoryError, VersionedRepository};
