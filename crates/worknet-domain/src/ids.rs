//! Typed entity identifiers
//!
//! Every remote-backed entity gets its own ID newtype over [`Uuid`] so that
//! a job ID can never be handed to a user lookup. IDs serialize as plain
//! UUID strings, matching the document field format used by the backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an identifier from its string form.
            ///
            /// # Errors
            /// Returns [`DomainError::InvalidId`] if the input is not a
            /// valid UUID.
            pub fn parse(input: &str) -> Result<Self, DomainError> {
                Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| DomainError::InvalidId {
                        entity: stringify!($name),
                        value: input.to_string(),
                    })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::User`].
    UserId
);
entity_id!(
    /// Identifier of a [`crate::Post`].
    PostId
);
entity_id!(
    /// Identifier of a [`crate::Job`].
    JobId
);
entity_id!(
    /// Identifier of a [`crate::JobApplication`].
    ApplicationId
);
entity_id!(
    /// Identifier of a [`crate::Comment`].
    CommentId
);
entity_id!(
    /// Identifier of a [`crate::Notification`].
    NotificationId
);
entity_id!(
    /// Identifier of a [`crate::ConnectionRequest`].
    RequestId
);
entity_id!(
    /// Identifier of a [`crate::Project`].
    ProjectId
);
entity_id!(
    /// Identifier of a [`crate::ProjectRole`].
    RoleId
);
entity_id!(
    /// Identifier of a job collection (an owner-defined grouping of jobs).
    CollectionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip_through_string() {
        let id = UserId::new();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        let err = JobId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { entity: "JobId", .. }));
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = PostId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
