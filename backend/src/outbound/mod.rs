//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the store behind every repository port
//! - **global_giving**: reqwest client for the donation-discovery API
//! - **news_api**: reqwest client for the news-discovery API
//! - **queue**: in-process message channel for donation jobs
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod global_giving;
mod http_support;
pub mod news_api;
pub mod persistence;
pub mod queue;
