//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{
    MockDonationQueue, MockDonationsCommand, MockDonationsQuery, MockIssueCommand,
    MockNewsCommand, MockNewsQuery,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Driving-port mocks with no expectations set.
#[derive(Default)]
pub struct TestPorts {
    pub issues: MockIssueCommand,
    pub news: MockNewsCommand,
    pub news_query: MockNewsQuery,
    pub donations: MockDonationsCommand,
    pub donations_query: MockDonationsQuery,
    pub donation_queue: MockDonationQueue,
}

impl TestPorts {
    /// Bundle the mocks into handler state for the `test` environment.
    pub fn into_state(self) -> HttpState {
        HttpState {
            issues: Arc::new(self.issues),
            news: Arc::new(self.news),
            news_query: Arc::new(self.news_query),
            donations: Arc::new(self.donations),
            donations_query: Arc::new(self.donations_query),
            donation_queue: Arc::new(self.donation_queue),
            environment: "test".to_owned(),
        }
    }
}

/// Send one request through the traced application built from `ports`.
pub async fn call(ports: TestPorts, request: TestRequest) -> ServiceResponse {
    call_state(ports.into_state(), request).await
}

/// Send one request through the traced application built from `state`.
pub async fn call_state(state: HttpState, request: TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

/// Decode a JSON response body.
pub async fn body_json(response: ServiceResponse) -> Value {
    test::read_body_json(response).await
}
