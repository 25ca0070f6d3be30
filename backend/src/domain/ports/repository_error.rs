//! Failure taxonomy shared by every repository port.

use crate::domain::EntityKind;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "repository conflict: {message}",
        /// The parent entity a write is scoped to is not stored.
        MissingParent { kind: EntityKind, name: String } =>
            "{kind} {name} does not exist",
    }
}
