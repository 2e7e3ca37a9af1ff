use chrono::{DateTime, Utc};

use super::component::Component;
use super::enums::{ComponentStatus, ScheduleStatus};
use super::ids::{ComponentId, ScheduleId, UserId};
use super::relation::Relation;
use super::user::{Update, User};
use crate::repository::{FieldValue, Queryable};

/// Planned maintenance window
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    pub message: String,
    pub scheduled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Author, when created by a user token
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub components: Relation<Vec<ScheduleComponent>>,
    /// Oldest first
    pub updates: Relation<Vec<Update>>,
    /// `Loaded(None)` when the schedule has no author
    pub user: Relation<Option<User>>,
}

impl Schedule {
    /// Lifecycle relative to `now`
    pub fn status_at(&self, now: DateTime<Utc>) -> ScheduleStatus {
        match self.completed_at {
            Some(completed) if completed <= now => ScheduleStatus::Complete,
            _ if self.scheduled_at <= now => ScheduleStatus::InProgress,
            _ => ScheduleStatus::Upcoming,
        }
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status_at(Utc::now())
    }
}

impl Queryable for Schedule {
    fn key(&self) -> u64 {
        self.id.get()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Integer(self.id.get() as i64),
            "name" => FieldValue::Text(self.name.clone()),
            "message" => FieldValue::Text(self.message.clone()),
            "status" => FieldValue::Integer(i64::from(self.status().value())),
            "scheduled_at" => FieldValue::Timestamp(self.scheduled_at),
            "completed_at" => self.completed_at.into(),
            "created_at" => FieldValue::Timestamp(self.created_at),
            "updated_at" => FieldValue::Timestamp(self.updated_at),
            _ => FieldValue::Null,
        }
    }
}

/// A component affected by a schedule, with the status it will be in
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleComponent {
    pub component: Component,
    pub component_status: ComponentStatus,
}

/// Link written when attaching a component to a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleComponentLink {
    pub component_id: ComponentId,
    pub component_status: ComponentStatus,
}

/// Validated create payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub name: String,
    pub message: String,
    pub scheduled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: Option<UserId>,
    pub components: Vec<ScheduleComponentLink>,
}

/// Validated partial update payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleChanges {
    pub name: Option<String>,
    pub message: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// `Some(None)` clears the completion time
    pub completed_at: Option<Option<DateTime<Utc>>>,
    /// Replaces every component link when present
    pub components: Option<Vec<ScheduleComponentLink>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn schedule(scheduled_at: DateTime<Utc>, completed_at: Option<DateTime<Utc>>) -> Schedule {
        let now = Utc::now();
        Schedule {
            id: ScheduleId::new(1),
            name: "Database upgrade".into(),
            message: String::new(),
            scheduled_at,
            completed_at,
            user_id: None,
            created_at: now,
            updated_at: now,
            components: Relation::NotLoaded,
            updates: Relation::NotLoaded,
            user: Relation::NotLoaded,
        }
    }

    #[test]
    fn test_status_derivation() {
        let now = Utc::now();
        let hour = Duration::hours(1);

        assert_eq!(
            schedule(now + hour, None).status_at(now),
            ScheduleStatus::Upcoming
        );
        assert_eq!(
            schedule(now - hour, None).status_at(now),
            ScheduleStatus::InProgress
        );
        assert_eq!(
            schedule(now - hour, Some(now + hour)).status_at(now),
            ScheduleStatus::InProgress
        );
        assert_eq!(
            schedule(now - hour * 2, Some(now - hour)).status_at(now),
            ScheduleStatus::Complete
        );
    }

    #[test]
    fn test_status_field_is_numeric_code() {
        let now = Utc::now();
        let done = schedule(now - Duration::hours(2), Some(now - Duration::hours(1)));
        assert_eq!(done.field("status"), FieldValue::Integer(2));
        assert_eq!(done.field("nonexistent"), FieldValue::Null);
    }
}
