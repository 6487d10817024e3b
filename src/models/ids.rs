//! Strongly-typed ID wrappers for all record types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! record types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace for ids derived from the string ids of unversioned stores
const LEGACY_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a3e_9d4b_4c8e_a1f0_5b7d_3e2c_9a10);

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Derive a stable ID from a legacy string key
            pub fn from_legacy(key: &str) -> Self {
                let name = format!("{}{}", $display_prefix, key);
                Self(Uuid::new_v5(&LEGACY_NAMESPACE, name.as_bytes()))
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Whether a user-supplied reference designates this ID
            ///
            /// Accepts the full UUID, the short display form, or any unambiguous
            /// UUID prefix with or without the display prefix.
            pub fn matches_ref(&self, reference: &str) -> bool {
                let reference = reference.trim().to_lowercase();
                let bare = reference
                    .strip_prefix($display_prefix)
                    .unwrap_or(&reference);
                !bare.is_empty() && self.0.to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(MonthId, "mon-");
define_id!(LoanId, "loan-");
define_id!(TripId, "trip-");
define_id!(VehicleExpenseId, "veh-");
define_id!(SavingsId, "sav-");
define_id!(CategorizedExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = LoanId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("loan-"));
        assert_eq!(display.len(), 13); // "loan-" + 8 chars
    }

    #[test]
    fn test_id_serialization() {
        let id = MonthId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: MonthId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_legacy_ids_are_stable() {
        assert_eq!(MonthId::from_legacy("k3j2h4g5f"), MonthId::from_legacy("k3j2h4g5f"));
        assert_ne!(MonthId::from_legacy("k3j2h4g5f"), MonthId::from_legacy("a1b2c3d4e"));
        // Same key in different collections must not collide
        assert_ne!(
            MonthId::from_legacy("x").as_uuid(),
            LoanId::from_legacy("x").as_uuid()
        );
    }

    #[test]
    fn test_matches_ref() {
        let id = TripId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches_ref("trip-550e8400"));
        assert!(id.matches_ref("550e84"));
        assert!(id.matches_ref("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches_ref("trip-"));
        assert!(!id.matches_ref("660e"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let id: SavingsId = "sav-550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }
}
