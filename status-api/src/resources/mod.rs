//! Wire representation of entities
//!
//! Every entity renders as `{ id, type, attributes, relationships? }`.
//! Presenters work only from what the entity already carries: a relation
//! appears under `relationships` exactly when it was loaded.

mod component_groups;
mod schedules;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub use component_groups::{ComponentAttributes, ComponentGroupAttributes};
pub use schedules::{ScheduleAttributes, ScheduleComponentAttributes, UpdateAttributes, UserAttributes};

/// Integer-coded value with its label, e.g. `{"value": 1, "human": "Operational"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub value: u8,
    pub human: &'static str,
}

macro_rules! enum_value_from {
    ($($ty:ty),+ $(,)?) => {
        $(impl From<$ty> for EnumValue {
            fn from(value: $ty) -> Self {
                Self {
                    value: value.value(),
                    human: value.label(),
                }
            }
        })+
    };
}

enum_value_from!(
    crate::models::ComponentStatus,
    crate::models::ComponentGroupCollapsed,
    crate::models::ResourceVisibility,
    crate::models::ScheduleStatus,
);

/// Attribute set of any presented entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Attributes {
    ComponentGroup(ComponentGroupAttributes),
    Component(ComponentAttributes),
    ScheduleComponent(ScheduleComponentAttributes),
    Schedule(ScheduleAttributes),
    Update(UpdateAttributes),
    User(UserAttributes),
}

/// Loaded relation contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Related {
    Many(Vec<ResourceObject>),
    One(Option<Box<ResourceObject>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub data: Related,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<&'static str, Relationship>,
}

impl ResourceObject {
    pub fn new(id: u64, kind: &'static str, attributes: Attributes) -> Self {
        Self {
            id,
            kind,
            attributes,
            relationships: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_many(mut self, name: &'static str, items: Vec<ResourceObject>) -> Self {
        self.relationships.insert(
            name,
            Relationship {
                data: Related::Many(items),
            },
        );
        self
    }

    #[must_use]
    pub fn with_one(mut self, name: &'static str, item: Option<ResourceObject>) -> Self {
        self.relationships.insert(
            name,
            Relationship {
                data: Related::One(item.map(Box::new)),
            },
        );
        self
    }
}

/// Converts an entity into its wire representation
pub trait Present {
    fn present(&self) -> ResourceObject;
}

pub(crate) fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentStatus;

    #[test]
    fn test_enum_value_shape() {
        let value = serde_json::to_value(EnumValue::from(ComponentStatus::PartialOutage)).unwrap();
        assert_eq!(value, serde_json::json!({"value": 3, "human": "Partial Outage"}));
    }

    #[test]
    fn test_empty_relationships_are_omitted() {
        let object = ResourceObject::new(
            1,
            "users",
            Attributes::User(UserAttributes {
                name: "Ops".into(),
                email: "ops@example.com".into(),
            }),
        );
        let value = serde_json::to_value(&object).unwrap();
        assert!(value.get("relationships").is_none());
        assert_eq!(value["type"], "users");
        assert_eq!(value["attributes"]["name"], "Ops");
    }

    #[test]
    fn test_missing_one_relation_renders_null() {
        let object = ResourceObject::new(
            2,
            "users",
            Attributes::User(UserAttributes {
                name: "Ops".into(),
                email: "ops@example.com".into(),
            }),
        )
        .with_one("manager", None);
        let value = serde_json::to_value(&object).unwrap();
        assert!(value["relationships"]["manager"]["data"].is_null());
    }

    #[test]
    fn test_timestamps_use_utc_seconds() {
        let at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05.678+01:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(rfc3339(at), "2026-01-02T02:04:05Z");
    }
}
