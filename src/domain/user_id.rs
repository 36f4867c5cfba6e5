//! Type-safe user identifier.
//!
//! [`UserId`] wraps the store-generated numeric primary key so that user
//! identifiers cannot be confused with post identifiers or other integers.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier of a persisted user.
///
/// Assigned by the store at creation time and immutable thereafter. Also
/// used as the foreign key carried by every [`super::Post`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw primary key value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw primary key value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let Ok(json) = serde_json::to_string(&UserId::new(7)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");
    }

    #[test]
    fn deserializes_from_bare_number() {
        let Ok(id) = serde_json::from_str::<UserId>("42") else {
            panic!("deserialization failed");
        };
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn converts_to_and_from_raw_key() {
        let id = UserId::from(21);
        assert_eq!(id, UserId::new(21));
        assert_eq!(i64::from(id), 21);
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(UserId::new(13).to_string(), "13");
    }
}
