//! Identity primitives shared by every persisted entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Store-assigned identifier of a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of persistable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A civic issue.
    Issue,
    /// An event belonging to an issue.
    Event,
    /// A news item gathered for an event.
    News,
    /// A donation record gathered for an event.
    Donation,
}

impl EntityKind {
    /// Lower-case label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Event => "event",
            Self::News => "news",
            Self::Donation => "donation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for issue and event names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameValidationError {
    /// The name is empty once surrounding whitespace is removed.
    #[error("{kind} name must not be empty")]
    Empty { kind: EntityKind },
    /// The name exceeds the storage limit.
    #[error("{kind} name must be at most {max} characters")]
    TooLong { kind: EntityKind, max: usize },
}

pub(crate) const MAX_NAME_CHARS: usize = 200;

pub(crate) fn normalise_name(kind: EntityKind, raw: &str) -> Result<String, NameValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::Empty { kind });
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(NameValidationError::TooLong {
            kind,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_owned())
}
