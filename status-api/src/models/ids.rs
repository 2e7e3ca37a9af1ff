use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a `u64` record identifier newtype.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        /// Only positive integers are valid identifiers.
        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: std::num::NonZeroU64 = s.parse()?;
                Ok(Self(value.get()))
            }
        }
    };
}

record_id!(ComponentId);
record_id!(ComponentGroupId);
record_id!(ScheduleId);
record_id!(UpdateId);
record_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_only() {
        assert_eq!("12".parse::<ScheduleId>().unwrap(), ScheduleId::new(12));
        assert!("0".parse::<ScheduleId>().is_err());
        assert!("-3".parse::<ScheduleId>().is_err());
        assert!("abc".parse::<ComponentGroupId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&ComponentId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: ComponentId = serde_json::from_str("5").unwrap();
        assert_eq!(back.get(), 5);
    }
}
