//! Generic store behind the repository ports.
//!
//! The store keeps every table in process memory. Each `create` runs under a
//! single write lock, so individual writes are atomic; there are no
//! multi-write transactions.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use floofloo::domain::Repositories;
//! use floofloo::outbound::persistence::InMemoryStore;
//!
//! let repositories = Repositories::from_store(Arc::new(InMemoryStore::default()));
//! # let _ = repositories;
//! ```

mod in_memory_store;

pub use in_memory_store::InMemoryStore;
