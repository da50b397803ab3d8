use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Placeholder carried by records that have not been stored yet.
            pub const UNASSIGNED: Self = Self(0);

            /// Raw integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// True once a store has handed out this identifier.
            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

record_id!(
    /// Identifier of a task row (store-assigned, `0` until stored).
    TaskId
);

record_id!(
    /// Identifier of a user row (store-assigned, `0` until stored).
    UserId
);
