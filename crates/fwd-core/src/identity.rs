//! # Identifier Newtypes
//!
//! Newtype wrappers for the record identifiers the invariant checks operate
//! on. Storage assigns UUID primary keys; these types keep the namespaces
//! apart, so a `UserId` (auth account) cannot stand in for an `EmployeeId`
//! (HR record) even though both are UUIDs on the wire.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FwdError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $ty:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $ty(Uuid);

        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $ty {
            type Err = FwdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self).map_err(|e| {
                    FwdError::Validation(format!(concat!("invalid ", $label, " {:?}: {}"), s, e))
                })
            }
        }
    };
}

uuid_id!(
    /// Identifier of an employee (HR record), the node type of the reporting graph.
    EmployeeId,
    "employee id"
);

uuid_id!(
    /// Identifier of an authenticated application user (notification recipient).
    UserId,
    "user id"
);

uuid_id!(
    /// Identifier of a notification template.
    TemplateId,
    "template id"
);

uuid_id!(
    /// Identifier of a persisted notification log row.
    NotificationLogId,
    "notification log id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(EmployeeId::new(), EmployeeId::new());
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = EmployeeId::new();
        let parsed: EmployeeId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = UserId::new();
        let parsed: UserId = format!("  {id}\n").parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<EmployeeId>().unwrap_err();
        assert!(matches!(err, FwdError::Validation(_)));
        assert!(err.to_string().contains("employee id"));
    }

    #[test]
    fn test_serializes_as_plain_uuid_string() {
        let raw = Uuid::new_v4();
        let id = TemplateId::from_uuid(raw);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{raw}\""));
        let back: TemplateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_uuid(), &raw);
    }
}
