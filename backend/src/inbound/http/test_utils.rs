//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{MockPostCommand, MockPostQuery, MockRoomCommand, MockRoomQuery};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Driving-port mocks; set expectations before calling [`MockPorts::into_app`].
#[derive(Default)]
pub struct MockPorts {
    pub posts: MockPostCommand,
    pub posts_query: MockPostQuery,
    pub rooms: MockRoomCommand,
    pub rooms_query: MockRoomQuery,
}

impl MockPorts {
    /// Build an app serving the API scope over these mocks.
    pub fn into_app(
        self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(HttpStatePorts {
            posts: Arc::new(self.posts),
            posts_query: Arc::new(self.posts_query),
            rooms: Arc::new(self.rooms),
            rooms_query: Arc::new(self.rooms_query),
        });
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure_api))
    }
}
