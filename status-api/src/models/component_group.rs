use chrono::{DateTime, Utc};

use super::component::Component;
use super::enums::{ComponentGroupCollapsed, ResourceVisibility};
use super::ids::{ComponentGroupId, ComponentId};
use super::relation::Relation;
use crate::repository::{FieldValue, Queryable};

/// Named bucket of components rendered together on the status page
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGroup {
    pub id: ComponentGroupId,
    pub name: String,
    pub order: u32,
    pub collapsed: ComponentGroupCollapsed,
    pub visible: ResourceVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Member components, ordered by `order` then id
    pub components: Relation<Vec<Component>>,
}

impl Queryable for ComponentGroup {
    fn key(&self) -> u64 {
        self.id.get()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Integer(self.id.get() as i64),
            "name" => FieldValue::Text(self.name.clone()),
            "order" => FieldValue::Integer(i64::from(self.order)),
            "collapsed" => FieldValue::Integer(i64::from(self.collapsed.value())),
            "visible" => FieldValue::Integer(i64::from(self.visible.value())),
            "created_at" => FieldValue::Timestamp(self.created_at),
            "updated_at" => FieldValue::Timestamp(self.updated_at),
            _ => FieldValue::Null,
        }
    }
}

/// Validated create payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewComponentGroup {
    pub name: String,
    pub order: u32,
    pub collapsed: ComponentGroupCollapsed,
    pub visible: ResourceVisibility,
    /// Components to move into the new group
    pub components: Vec<ComponentId>,
}

/// Validated partial update payload; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentGroupChanges {
    pub name: Option<String>,
    pub order: Option<u32>,
    pub collapsed: Option<ComponentGroupCollapsed>,
    pub visible: Option<ResourceVisibility>,
    /// Replaces the group's full membership when present
    pub components: Option<Vec<ComponentId>>,
}
