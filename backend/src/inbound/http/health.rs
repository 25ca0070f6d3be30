//! Health endpoints: liveness and readiness probes for orchestration.
//!
//! The process serves two entry points, so readiness requires both: the
//! HTTP listener is bound and the donation queue consumer is pulling
//! messages. Once shutdown starts the process is draining and both probes
//! fail.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Shared readiness of the HTTP listener and the queue consumer.
#[derive(Debug, Default)]
pub struct HealthState {
    listening: AtomicBool,
    consumer_running: AtomicBool,
    draining: AtomicBool,
}

/// Point-in-time view rendered by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub listening: bool,
    pub consumer_running: bool,
    pub draining: bool,
}

impl HealthSnapshot {
    /// Both entry points are up and shutdown has not begun.
    pub fn is_ready(&self) -> bool {
        self.listening && self.consumer_running && !self.draining
    }

    /// Shutdown has not begun.
    pub fn is_alive(&self) -> bool {
        !self.draining
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The HTTP listener is bound.
    pub fn mark_listening(&self) {
        self.listening.store(true, Ordering::Release);
    }

    /// The queue consumer loop has started.
    pub fn mark_consumer_running(&self) {
        self.consumer_running.store(true, Ordering::Release);
    }

    /// The queue consumer loop has returned.
    pub fn mark_consumer_stopped(&self) {
        self.consumer_running.store(false, Ordering::Release);
    }

    /// Shutdown has begun.
    pub fn mark_draining(&self) {
        self.draining.store(true, Ordering::Release);
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            listening: self.listening.load(Ordering::Acquire),
            consumer_running: self.consumer_running.load(Ordering::Acquire),
            draining: self.draining.load(Ordering::Acquire),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_ready()
    }

    pub fn is_alive(&self) -> bool {
        self.snapshot().is_alive()
    }
}

fn probe_response(probe_ok: bool, snapshot: HealthSnapshot) -> HttpResponse {
    let mut response = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(snapshot)
}

/// Readiness probe: 200 once both entry points are up, 503 otherwise.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let snapshot = state.snapshot();
    probe_response(snapshot.is_ready(), snapshot)
}

/// Liveness probe: 200 until shutdown begins.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let snapshot = state.snapshot();
    probe_response(snapshot.is_alive(), snapshot)
}
