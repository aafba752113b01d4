//! HTTP inbound adapter exposing the post and room endpoints.
//!
//! Handlers parse and validate requests, call the driving ports held in
//! [`state::HttpState`], and render domain errors through
//! [`error::ApiResult`]. [`configure_api`] registers every versioned route so
//! the server and handler tests share one routing table.

use actix_web::web;

pub mod error;
pub mod health;
pub mod payloads;
pub mod posts;
pub mod rooms;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api/v1` routes and their extractor error handlers.
///
/// Mount under a scope:
///
/// ```ignore
/// App::new().service(web::scope("/api/v1").configure(configure_api))
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(rooms::create_room)
        .service(rooms::list_rooms)
        .service(rooms::get_room)
        .service(rooms::update_room)
        .service(rooms::delete_room)
        .service(rooms::request_membership)
        .service(rooms::list_members)
        .service(rooms::decide_membership)
        .service(posts::create_post)
        .service(posts::list_room_posts)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(posts::like_post)
        .service(posts::list_likes)
        .service(posts::comment_post)
        .service(posts::list_comments);
}
