//! Inbound adapters that translate external triggers into driving-port
//! calls while keeping framework details at the edge.
//!
//! - [`http`]: actix-web handlers; outcomes become status codes and JSON.
//! - [`queue`]: queue-message handler; outcomes are only logged.

pub mod http;
pub mod queue;
