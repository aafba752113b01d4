//! Shared harness for HTTP integration tests over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use agora::Trace;
use agora::domain::{MemberId, PostService, RoomService};
use agora::inbound::http::configure_api;
use agora::inbound::http::state::{HttpState, HttpStatePorts};
use agora::outbound::memory::{InMemoryPostRepository, InMemoryRoomRepository};

/// Handler state over fresh in-memory repositories.
pub fn in_memory_state() -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let posts = Arc::new(PostService::new(
        Arc::new(InMemoryPostRepository::new()),
        clock.clone(),
    ));
    let rooms = Arc::new(RoomService::new(
        Arc::new(InMemoryRoomRepository::new()),
        clock,
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        posts: posts.clone(),
        posts_query: posts,
        rooms: rooms.clone(),
        rooms_query: rooms,
    }))
}

/// Initialise the API over fresh in-memory state.
pub async fn init_app()
-> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    actix_test::init_service(
        App::new()
            .app_data(in_memory_state())
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await
}

/// Send `request` and return the status alongside the JSON body.
pub async fn send<S>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

pub fn member_actor() -> Value {
    json!({"kind": "member", "id": MemberId::random().to_string()})
}

/// Open a room and return its id.
pub async fn open_room<S>(app: &S) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        TestRequest::post().uri("/api/v1/rooms").set_json(json!({
            "title": "Allotment",
            "categoryId": uuid::Uuid::new_v4().to_string(),
            "roomOwnerId": uuid::Uuid::new_v4().to_string(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("room id").to_owned()
}

/// Publish a post titled "A" in `room_id` and return its id.
pub async fn publish_post<S>(app: &S, room_id: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        TestRequest::post()
            .uri(&format!("/api/v1/rooms/{room_id}/posts"))
            .set_json(json!({"title": "A", "author": member_actor()})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["version"], 1);
    body["id"].as_str().expect("post id").to_owned()
}
