use chrono::{DateTime, Utc};

use super::enums::ComponentStatus;
use super::ids::{ComponentGroupId, ComponentId};

/// A monitored part of the system shown on the status page
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub status: ComponentStatus,
    pub order: u32,
    pub component_group_id: Option<ComponentGroupId>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a component directly into storage
#[derive(Debug, Clone)]
pub struct NewComponent {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub status: ComponentStatus,
    pub order: u32,
    pub component_group_id: Option<ComponentGroupId>,
    pub enabled: bool,
}

impl NewComponent {
    /// An enabled, operational, ungrouped component
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            link: None,
            status: ComponentStatus::Operational,
            order: 0,
            component_group_id: None,
            enabled: true,
        }
    }

    #[must_use]
    pub fn in_group(mut self, group: ComponentGroupId) -> Self {
        self.component_group_id = Some(group);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ComponentStatus) -> Self {
        self.status = status;
        self
    }
}
