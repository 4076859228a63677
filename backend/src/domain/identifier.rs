//! Validated string identifiers shared by users, teams, and pull requests.
//!
//! Identifiers are caller supplied (the service never mints them), so the
//! only invariants enforced here are that the value is non-empty and carries
//! no surrounding whitespace. Each identifier orders lexically, which is the
//! order stores use when listing members and reviewers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by identifier constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierValidationError {
    /// The identifier is empty after trimming whitespace.
    #[error("{kind} must not be empty")]
    Empty {
        /// Human readable identifier kind, e.g. `user id`.
        kind: &'static str,
    },
    /// The identifier has leading or trailing whitespace.
    #[error("{kind} must not contain surrounding whitespace")]
    SurroundingWhitespace {
        /// Human readable identifier kind, e.g. `user id`.
        kind: &'static str,
    },
}

fn validate(kind: &'static str, raw: &str) -> Result<(), IdentifierValidationError> {
    if raw.trim().is_empty() {
        return Err(IdentifierValidationError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdentifierValidationError::SurroundingWhitespace { kind });
    }
    Ok(())
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentifierValidationError> {
                let raw = value.into();
                validate($kind, &raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identifier as a string slice.
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

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_identifier!(
    /// Stable user identifier, e.g. `u1`.
    UserId,
    "user id"
);

define_identifier!(
    /// Unique team name; teams are keyed by name.
    TeamName,
    "team name"
);

define_identifier!(
    /// Unique pull request identifier, e.g. `pr-1001`.
    PullRequestId,
    "pull request id"
);
