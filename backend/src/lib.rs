//! Floofloo backend library: civic issues, their events, and the news and
//! donation records gathered for each event.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public middleware re-export for request tracing.
pub use middleware::Trace;
/// Public trace identifier re-export for log correlation.
pub use domain::TraceId;
