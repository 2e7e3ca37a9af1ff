use chrono::{DateTime, Utc};

use super::ids::{ScheduleId, UpdateId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Progress note posted against a schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub id: UpdateId,
    pub schedule_id: ScheduleId,
    pub message: String,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
