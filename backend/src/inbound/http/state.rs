//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PostCommand, PostQuery, RoomCommand, RoomQuery};

/// Parameter object bundling the driving ports for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub posts: Arc<dyn PostCommand>,
    pub posts_query: Arc<dyn PostQuery>,
    pub rooms: Arc<dyn RoomCommand>,
    pub rooms_query: Arc<dyn RoomQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<dyn PostCommand>,
    pub posts_query: Arc<dyn PostQuery>,
    pub rooms: Arc<dyn RoomCommand>,
    pub rooms_query: Arc<dyn RoomQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use agora::domain::{PostService, RoomService};
    /// use agora::inbound::http::state::{HttpState, HttpStatePorts};
    /// use agora::outbound::memory::{InMemoryPostRepository, InMemoryRoomRepository};
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let posts = Arc::new(PostService::new(Arc::new(InMemoryPostRepository::new()), clock.clone()));
    /// let rooms = Arc::new(RoomService::new(Arc::new(InMemoryRoomRepository::new()), clock));
    /// let state = HttpState::new(HttpStatePorts {
    ///     posts: posts.clone(),
    ///     posts_query: posts,
    ///     rooms: rooms.clone(),
    ///     rooms_query: rooms,
    /// });
    /// let _rooms = state.rooms_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            posts,
            posts_query,
            rooms,
            rooms_query,
        } = ports;
        Self {
            posts,
            posts_query,
            rooms,
            rooms_query,
        }
    }
}
