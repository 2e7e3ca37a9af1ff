//! Integer-coded enumerations stored on records and rendered as `{value, human}`

/// Declares an enum stored as a `u8` code with a human-readable label.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $value:literal => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn value(self) -> u8 {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.value()
            }
        }
    };
}

coded_enum! {
    /// Operational state of a component
    ComponentStatus {
        Operational = 1 => "Operational",
        PerformanceIssues = 2 => "Performance Issues",
        PartialOutage = 3 => "Partial Outage",
        MajorOutage = 4 => "Major Outage",
        Unknown = 5 => "Unknown",
    }
}

coded_enum! {
    /// How a component group renders on the status page
    ComponentGroupCollapsed {
        Expanded = 0 => "Expanded",
        Collapsed = 1 => "Collapsed",
        CollapsedUnlessIncident = 2 => "Collapsed unless there is an active incident",
    }
}

coded_enum! {
    /// Who may see a resource on the status page
    ResourceVisibility {
        Authenticated = 0 => "Authenticated users",
        Guest = 1 => "Guests",
        Hidden = 2 => "Hidden",
    }
}

coded_enum! {
    /// Derived lifecycle of a maintenance schedule
    ScheduleStatus {
        Upcoming = 0 => "Upcoming",
        InProgress = 1 => "In Progress",
        Complete = 2 => "Complete",
    }
}
