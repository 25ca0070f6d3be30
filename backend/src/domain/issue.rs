//! Issues and the events raised under them.
//!
//! Both are identified by name. Issue names are unique system wide; event
//! names are unique across all events because lookups go by name alone.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind, NameValidationError, normalise_name};

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and normalise a raw name.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, NameValidationError> {
                normalise_name($kind, raw.as_ref()).map(Self)
            }

            /// Borrow the normalised name.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $name {
            type Error = NameValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

validated_name!(
    /// Trimmed, non-empty issue name.
    ///
    /// # Examples
    /// ```
    /// use floofloo::domain::IssueName;
    ///
    /// let name = IssueName::new(" climate ").expect("valid name");
    /// assert_eq!(name.as_str(), "climate");
    /// ```
    IssueName,
    EntityKind::Issue
);

validated_name!(
    /// Trimmed, non-empty event name; also the keyword sent to external sources.
    EventName,
    EntityKind::Event
);

/// A civic issue, created on the first request that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: EntityId,
    pub name: IssueName,
    pub created_at: DateTime<Utc>,
}

/// An event belonging to exactly one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EntityId,
    pub issue_id: EntityId,
    pub name: EventName,
    pub created_at: DateTime<Utc>,
}
