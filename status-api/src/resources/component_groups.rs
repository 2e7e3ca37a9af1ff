use serde::Serialize;

use super::{rfc3339, Attributes, EnumValue, Present, ResourceObject};
use crate::models::{Component, ComponentGroup};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentGroupAttributes {
    pub name: String,
    pub order: u32,
    pub collapsed: EnumValue,
    pub visible: EnumValue,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentAttributes {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub status: EnumValue,
    pub order: u32,
    pub component_group_id: Option<u64>,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Component> for ComponentAttributes {
    fn from(component: &Component) -> Self {
        Self {
            name: component.name.clone(),
            description: component.description.clone(),
            link: component.link.clone(),
            status: component.status.into(),
            order: component.order,
            component_group_id: component.component_group_id.map(|id| id.get()),
            enabled: component.enabled,
            created_at: rfc3339(component.created_at),
            updated_at: rfc3339(component.updated_at),
        }
    }
}

impl Present for Component {
    fn present(&self) -> ResourceObject {
        ResourceObject::new(
            self.id.get(),
            "components",
            Attributes::Component(self.into()),
        )
    }
}

impl Present for ComponentGroup {
    fn present(&self) -> ResourceObject {
        let object = ResourceObject::new(
            self.id.get(),
            "component_groups",
            Attributes::ComponentGroup(ComponentGroupAttributes {
                name: self.name.clone(),
                order: self.order,
                collapsed: self.collapsed.into(),
                visible: self.visible.into(),
                created_at: rfc3339(self.created_at),
                updated_at: rfc3339(self.updated_at),
            }),
        );

        match self.components.loaded() {
            Some(components) => {
                object.with_many("components", components.iter().map(Present::present).collect())
            }
            None => object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComponentGroupCollapsed, ComponentGroupId, ComponentId, ComponentStatus, Relation,
        ResourceVisibility,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn group(components: Relation<Vec<Component>>) -> ComponentGroup {
        let at = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        ComponentGroup {
            id: ComponentGroupId::new(3),
            name: "Platform".into(),
            order: 1,
            collapsed: ComponentGroupCollapsed::CollapsedUnlessIncident,
            visible: ResourceVisibility::Guest,
            created_at: at,
            updated_at: at,
            components,
        }
    }

    #[test]
    fn test_group_without_loaded_components() {
        let value = serde_json::to_value(group(Relation::NotLoaded).present()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "type": "component_groups",
                "attributes": {
                    "name": "Platform",
                    "order": 1,
                    "collapsed": {"value": 2, "human": "Collapsed unless there is an active incident"},
                    "visible": {"value": 1, "human": "Guests"},
                    "created_at": "2026-04-01T12:00:00Z",
                    "updated_at": "2026-04-01T12:00:00Z"
                }
            })
        );
    }

    #[test]
    fn test_group_with_loaded_components() {
        let at = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        let api = Component {
            id: ComponentId::new(8),
            name: "API".into(),
            description: String::new(),
            link: None,
            status: ComponentStatus::MajorOutage,
            order: 0,
            component_group_id: Some(ComponentGroupId::new(3)),
            enabled: true,
            created_at: at,
            updated_at: at,
        };

        let value = serde_json::to_value(group(Relation::Loaded(vec![api])).present()).unwrap();
        let members = &value["relationships"]["components"]["data"];
        assert_eq!(members[0]["id"], 8);
        assert_eq!(members[0]["type"], "components");
        assert_eq!(members[0]["attributes"]["status"]["human"], "Major Outage");
        assert_eq!(members[0]["attributes"]["component_group_id"], 3);
    }

    #[test]
    fn test_group_with_empty_loaded_components_keeps_key() {
        let value = serde_json::to_value(group(Relation::Loaded(Vec::new())).present()).unwrap();
        assert_eq!(value["relationships"]["components"]["data"], json!([]));
    }
}
