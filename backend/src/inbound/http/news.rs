//! News handlers. The issue segment is part of the resource path only;
//! events are looked up by name.
//!
//! ```text
//! GET  /api/v1/issue/{issue}/event/{event}/news
//! POST /api/v1/issue/{issue}/event/{event}/news
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::inbound::http::error::respond;
use crate::inbound::http::state::HttpState;

/// List the news stored for an event.
#[get("/issue/{issue}/event/{event}/news")]
pub async fn list_news(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (_, event) = path.into_inner();
    respond("list_news", state.news_query.list_news(&event)).await
}

/// Fetch news for an event from the news source and store it.
#[post("/issue/{issue}/event/{event}/news")]
pub async fn add_news(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (_, event) = path.into_inner();
    respond("add_news", state.news.add_news(&event)).await
}
