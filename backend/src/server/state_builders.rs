//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use agora::domain::ports::{PostRepository, RoomRepository};
use agora::domain::{PostService, RoomService};
use agora::inbound::http::state::{HttpState, HttpStatePorts};
use agora::outbound::memory::{InMemoryPostRepository, InMemoryRoomRepository};
use agora::outbound::persistence::{DieselPostRepository, DieselRoomRepository};

use super::ServerConfig;

/// Build handler state over Diesel repositories when a pool is configured,
/// otherwise over the in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("serving rooms and posts from PostgreSQL");
            ports_over(
                DieselPostRepository::new(pool.clone()),
                DieselRoomRepository::new(pool.clone()),
                clock,
            )
        }
        None => {
            info!("no database configured; serving rooms and posts from memory");
            ports_over(
                InMemoryPostRepository::new(),
                InMemoryRoomRepository::new(),
                clock,
            )
        }
    };
    web::Data::new(HttpState::new(ports))
}

fn ports_over<P, R>(posts: P, rooms: R, clock: Arc<dyn Clock>) -> HttpStatePorts
where
    P: PostRepository + 'static,
    R: RoomRepository + 'static,
{
    let posts = Arc::new(PostService::new(Arc::new(posts), Arc::clone(&clock)));
    let rooms = Arc::new(RoomService::new(Arc::new(rooms), clock));
    HttpStatePorts {
        posts: posts.clone(),
        posts_query: posts,
        rooms: rooms.clone(),
        rooms_query: rooms,
    }
}
