//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers translate path segments into driving-port calls and render the
//! returned outcome through [`error::respond`].

use actix_web::web;

pub mod donations;
pub mod error;
pub mod health;
pub mod issues;
pub mod news;
pub mod root;
pub mod state;
#[cfg(test)]
pub mod test_utils;

/// Register the root resource and every `/api/v1` handler.
///
/// Handlers expect [`state::HttpState`] in the application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root::root).service(
        web::scope("/api/v1")
            .service(issues::add_issue)
            .service(issues::add_event)
            .service(news::list_news)
            .service(news::add_news)
            .service(donations::list_donations)
            .service(donations::add_donations)
            .service(donations::queue_donations),
    );
}
