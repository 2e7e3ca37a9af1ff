use serde::Deserialize;

use super::{code, invalid, required, some_nullable, text, timestamp, Validate};
use crate::handlers::{ApiError, ApiOperation};
use crate::models::{ComponentId, NewSchedule, ScheduleChanges, ScheduleComponentLink};

/// One affected component and the status it takes during the window
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScheduleComponentRequest {
    pub id: u64,
    pub status: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreScheduleRequest {
    pub name: Option<String>,
    pub message: Option<String>,
    pub scheduled_at: Option<String>,
    pub completed_at: Option<String>,
    pub components: Option<Vec<ScheduleComponentRequest>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    pub name: Option<String>,
    pub message: Option<String>,
    pub scheduled_at: Option<String>,
    /// `null` clears the completion time
    #[serde(default, deserialize_with = "some_nullable")]
    pub completed_at: Option<Option<String>>,
    pub components: Option<Vec<ScheduleComponentRequest>>,
}

fn message(operation: ApiOperation, value: String) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(required(operation, "message"));
    }
    Ok(value)
}

fn links(
    operation: ApiOperation,
    requested: Vec<ScheduleComponentRequest>,
) -> Result<Vec<ScheduleComponentLink>, ApiError> {
    let mut links: Vec<ScheduleComponentLink> = Vec::with_capacity(requested.len());
    for entry in requested {
        if entry.id == 0 {
            return Err(invalid(operation, "components", "Component ids must be positive."));
        }
        let component_id = ComponentId::new(entry.id);
        if links.iter().any(|link| link.component_id == component_id) {
            return Err(invalid(
                operation,
                "components",
                format!("Component {} is listed more than once.", component_id),
            ));
        }
        links.push(ScheduleComponentLink {
            component_id,
            component_status: code(operation, "components", entry.status)?,
        });
    }
    Ok(links)
}

impl Validate for StoreScheduleRequest {
    type Output = NewSchedule;

    /// Leaves `user_id` unset; the create action fills it from the caller.
    fn validate(self) -> Result<NewSchedule, ApiError> {
        const OP: ApiOperation = ApiOperation::Create;
        let name = self.name.ok_or_else(|| required(OP, "name"))?;
        let body = self.message.ok_or_else(|| required(OP, "message"))?;
        let scheduled_at = self
            .scheduled_at
            .ok_or_else(|| required(OP, "scheduled_at"))?;

        Ok(NewSchedule {
            name: text(OP, "name", name)?,
            message: message(OP, body)?,
            scheduled_at: timestamp(OP, "scheduled_at", &scheduled_at)?,
            completed_at: self
                .completed_at
                .map(|value| timestamp(OP, "completed_at", &value))
                .transpose()?,
            user_id: None,
            components: links(OP, self.components.unwrap_or_default())?,
        })
    }
}

impl Validate for UpdateScheduleRequest {
    type Output = ScheduleChanges;

    fn validate(self) -> Result<ScheduleChanges, ApiError> {
        const OP: ApiOperation = ApiOperation::Update;

        let completed_at = match self.completed_at {
            None => None,
            Some(None) => Some(None),
            Some(Some(value)) => Some(Some(timestamp(OP, "completed_at", &value)?)),
        };

        Ok(ScheduleChanges {
            name: self.name.map(|name| text(OP, "name", name)).transpose()?,
            message: self.message.map(|body| message(OP, body)).transpose()?,
            scheduled_at: self
                .scheduled_at
                .map(|value| timestamp(OP, "scheduled_at", &value))
                .transpose()?,
            completed_at,
            components: self.components.map(|entries| links(OP, entries)).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentStatus;

    #[test]
    fn test_store_requires_fields_in_order() {
        let error = StoreScheduleRequest::default().validate().unwrap_err();
        assert_eq!(error.field.as_deref(), Some("name"));

        let request: StoreScheduleRequest =
            serde_json::from_str(r#"{"name": "Upgrade", "message": "Brief downtime"}"#).unwrap();
        assert_eq!(
            request.validate().unwrap_err().field.as_deref(),
            Some("scheduled_at")
        );
    }

    #[test]
    fn test_store_parses_links() {
        let request: StoreScheduleRequest = serde_json::from_str(
            r#"{
                "name": "Upgrade",
                "message": "Brief downtime",
                "scheduled_at": "2026-05-01 22:00",
                "components": [{"id": 4, "status": 3}]
            }"#,
        )
        .unwrap();
        let schedule = request.validate().unwrap();
        assert_eq!(schedule.user_id, None);
        assert_eq!(
            schedule.components,
            vec![ScheduleComponentLink {
                component_id: ComponentId::new(4),
                component_status: ComponentStatus::PartialOutage,
            }]
        );
    }

    #[test]
    fn test_store_rejects_duplicate_links() {
        let request: StoreScheduleRequest = serde_json::from_str(
            r#"{
                "name": "Upgrade",
                "message": "Brief downtime",
                "scheduled_at": "2026-05-01T22:00:00Z",
                "components": [{"id": 4, "status": 3}, {"id": 4, "status": 4}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            request.validate().unwrap_err().field.as_deref(),
            Some("components")
        );
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let cleared: UpdateScheduleRequest =
            serde_json::from_str(r#"{"completed_at": null}"#).unwrap();
        assert_eq!(cleared.validate().unwrap().completed_at, Some(None));

        let untouched: UpdateScheduleRequest = serde_json::from_str(r#"{"name": "New"}"#).unwrap();
        let changes = untouched.validate().unwrap();
        assert_eq!(changes.completed_at, None);
        assert_eq!(changes.name.as_deref(), Some("New"));
    }

    #[test]
    fn test_update_rejects_bad_timestamp() {
        let request: UpdateScheduleRequest =
            serde_json::from_str(r#"{"completed_at": "soon"}"#).unwrap();
        let error = request.validate().unwrap_err();
        assert_eq!(error.field.as_deref(), Some("completed_at"));
        assert_eq!(error.operation, ApiOperation::Update);
    }
}
