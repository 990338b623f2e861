//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TariffId` where a `DayPlanId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
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
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(TariffId, "Unique identifier for a tariff.");
typed_id!(DayPlanId, "Unique identifier for a day plan (shift template).");
typed_id!(
    AccountId,
    "Unique identifier for a time account receiving posted minutes."
);
typed_id!(
    CalculationRuleId,
    "Unique identifier for an absence calculation rule."
);
typed_id!(AbsenceTypeId, "Unique identifier for an absence type.");
typed_id!(
    CalculationGroupId,
    "Unique identifier for a vacation calculation group."
);
typed_id!(EmploymentTypeId, "Unique identifier for an employment type.");
typed_id!(BookingId, "Unique identifier for a clock booking.");
