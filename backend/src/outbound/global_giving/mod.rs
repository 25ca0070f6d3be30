//! GlobalGiving outbound adapter.
//!
//! Implements the `DonationSource` port against the GlobalGiving public
//! project search API.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_GLOBAL_GIVING_URL, GlobalGivingSource};
