use serde::Serialize;

use super::{rfc3339, Attributes, ComponentAttributes, EnumValue, Present, ResourceObject};
use crate::models::{Schedule, ScheduleComponent, Update, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleAttributes {
    pub name: String,
    pub message: String,
    pub status: EnumValue,
    pub scheduled_at: String,
    pub completed_at: Option<String>,
    pub user_id: Option<u64>,
    pub created_at: String,
    pub updated_at: String,
}

/// A component as seen through a schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleComponentAttributes {
    #[serde(flatten)]
    pub component: ComponentAttributes,
    /// Status the component is in during the window
    pub component_status: EnumValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateAttributes {
    pub message: String,
    pub user_id: Option<u64>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAttributes {
    pub name: String,
    pub email: String,
}

impl Present for ScheduleComponent {
    fn present(&self) -> ResourceObject {
        ResourceObject::new(
            self.component.id.get(),
            "components",
            Attributes::ScheduleComponent(ScheduleComponentAttributes {
                component: (&self.component).into(),
                component_status: self.component_status.into(),
            }),
        )
    }
}

impl Present for Update {
    fn present(&self) -> ResourceObject {
        ResourceObject::new(
            self.id.get(),
            "updates",
            Attributes::Update(UpdateAttributes {
                message: self.message.clone(),
                user_id: self.user_id.map(|id| id.get()),
                created_at: rfc3339(self.created_at),
            }),
        )
    }
}

impl Present for User {
    fn present(&self) -> ResourceObject {
        ResourceObject::new(
            self.id.get(),
            "users",
            Attributes::User(UserAttributes {
                name: self.name.clone(),
                email: self.email.clone(),
            }),
        )
    }
}

impl Present for Schedule {
    fn present(&self) -> ResourceObject {
        let mut object = ResourceObject::new(
            self.id.get(),
            "schedules",
            Attributes::Schedule(ScheduleAttributes {
                name: self.name.clone(),
                message: self.message.clone(),
                status: self.status().into(),
                scheduled_at: rfc3339(self.scheduled_at),
                completed_at: self.completed_at.map(rfc3339),
                user_id: self.user_id.map(|id| id.get()),
                created_at: rfc3339(self.created_at),
                updated_at: rfc3339(self.updated_at),
            }),
        );

        if let Some(components) = self.components.loaded() {
            object = object.with_many("components", components.iter().map(Present::present).collect());
        }
        if let Some(updates) = self.updates.loaded() {
            object = object.with_many("updates", updates.iter().map(Present::present).collect());
        }
        if let Some(user) = self.user.loaded() {
            object = object.with_one("user", user.as_ref().map(Present::present));
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Component, ComponentId, ComponentStatus, Relation, ScheduleId, UpdateId, UserId,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn schedule() -> Schedule {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        Schedule {
            id: ScheduleId::new(11),
            name: "Storage migration".into(),
            message: "Moving volumes".into(),
            scheduled_at: at,
            completed_at: Some(at + Duration::hours(2)),
            user_id: Some(UserId::new(2)),
            created_at: at,
            updated_at: at,
            components: Relation::NotLoaded,
            updates: Relation::NotLoaded,
            user: Relation::NotLoaded,
        }
    }

    #[test]
    fn test_schedule_attributes() {
        let value = serde_json::to_value(schedule().present()).unwrap();
        assert_eq!(value["type"], "schedules");
        assert_eq!(value["attributes"]["scheduled_at"], "2024-06-01T09:30:00Z");
        assert_eq!(value["attributes"]["completed_at"], "2024-06-01T11:30:00Z");
        assert_eq!(value["attributes"]["status"]["value"], 2);
        assert!(value.get("relationships").is_none());
    }

    #[test]
    fn test_only_loaded_relations_render() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let mut loaded = schedule();
        loaded.updates = Relation::Loaded(vec![Update {
            id: UpdateId::new(1),
            schedule_id: loaded.id,
            message: "Underway".into(),
            user_id: None,
            created_at: at,
        }]);
        loaded.user = Relation::Loaded(None);

        let value = serde_json::to_value(loaded.present()).unwrap();
        let relationships = value["relationships"].as_object().unwrap();
        assert_eq!(relationships.len(), 2);
        assert_eq!(relationships["updates"]["data"][0]["attributes"]["message"], "Underway");
        assert!(relationships["user"]["data"].is_null());
        assert!(!relationships.contains_key("components"));
    }

    #[test]
    fn test_schedule_component_carries_link_status() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let mut loaded = schedule();
        loaded.components = Relation::Loaded(vec![ScheduleComponent {
            component: Component {
                id: ComponentId::new(4),
                name: "Storage".into(),
                description: String::new(),
                link: None,
                status: ComponentStatus::Operational,
                order: 0,
                component_group_id: None,
                enabled: true,
                created_at: at,
                updated_at: at,
            },
            component_status: ComponentStatus::PartialOutage,
        }]);

        let value = serde_json::to_value(loaded.present()).unwrap();
        let component = &value["relationships"]["components"]["data"][0];
        assert_eq!(component["attributes"]["name"], "Storage");
        assert_eq!(component["attributes"]["status"]["value"], 1);
        assert_eq!(component["attributes"]["component_status"]["value"], 3);
    }
}
