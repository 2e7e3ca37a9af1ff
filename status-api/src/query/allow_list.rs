/// How a filter value is compared against a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring
    Partial,
    /// String equality
    Exact,
}

/// Everything a client may ask for when listing one resource type.
///
/// Names outside these lists are rejected before storage is touched.
#[derive(Debug)]
pub struct ResourceQueryConfig {
    /// Resource type as it appears in URLs and presented objects
    pub resource: &'static str,
    pub sortable: &'static [&'static str],
    pub filterable: &'static [(&'static str, MatchMode)],
    pub includable: &'static [&'static str],
}

impl ResourceQueryConfig {
    pub fn sortable_field(&self, name: &str) -> Option<&'static str> {
        self.sortable.iter().copied().find(|field| *field == name)
    }

    pub fn filter_mode(&self, name: &str) -> Option<(&'static str, MatchMode)> {
        self.filterable
            .iter()
            .copied()
            .find(|(field, _)| *field == name)
    }

    pub fn includable_relation(&self, name: &str) -> Option<&'static str> {
        self.includable.iter().copied().find(|relation| *relation == name)
    }
}

pub static COMPONENT_GROUPS: ResourceQueryConfig = ResourceQueryConfig {
    resource: "component-groups",
    sortable: &["name", "id"],
    filterable: &[],
    includable: &["components"],
};

pub static SCHEDULES: ResourceQueryConfig = ResourceQueryConfig {
    resource: "schedules",
    sortable: &["name", "id", "scheduled_at", "completed_at"],
    filterable: &[("name", MatchMode::Partial), ("status", MatchMode::Exact)],
    includable: &["components", "updates", "user"],
};
