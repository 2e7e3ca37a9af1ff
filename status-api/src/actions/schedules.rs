use chrono::{DateTime, Utc};

use super::ActionError;
use crate::guard::Caller;
use crate::models::{NewSchedule, Schedule, ScheduleChanges, ScheduleId, UserId};
use crate::repository::{Repository, RepositoryError, RepositoryOperation};

fn ensure_window(
    scheduled_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> Result<(), ActionError> {
    match completed_at {
        Some(completed) if completed < scheduled_at => Err(ActionError::invalid(
            "completed_at",
            "The completed at must be a date after or equal to scheduled at.",
        )),
        _ => Ok(()),
    }
}

/// Persist a schedule authored by the calling user, if any
pub struct CreateSchedule<'a, R> {
    repo: &'a R,
}

impl<'a, R> CreateSchedule<'a, R>
where
    R: Repository<Entity = Schedule, Create = NewSchedule>,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, mut data: NewSchedule, caller: &Caller) -> Result<Schedule, ActionError> {
        ensure_window(data.scheduled_at, data.completed_at)?;
        data.user_id = caller.user_id().map(UserId::new);

        let schedule = self.repo.create(data).await?;
        tracing::info!(
            schedule_id = %schedule.id,
            user_id = ?schedule.user_id,
            "Created schedule"
        );
        Ok(schedule)
    }
}

pub struct UpdateSchedule<'a, R> {
    repo: &'a R,
}

impl<'a, R> UpdateSchedule<'a, R>
where
    R: Repository<Id = ScheduleId, Entity = Schedule, Update = ScheduleChanges>,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Patch `target`; the resulting window must still be ordered
    pub async fn handle(&self, target: &Schedule, changes: ScheduleChanges) -> Result<(), ActionError> {
        ensure_window(
            changes.scheduled_at.unwrap_or(target.scheduled_at),
            changes.completed_at.unwrap_or(target.completed_at),
        )?;

        self.repo.update(&target.id, changes).await?;
        tracing::info!(schedule_id = %target.id, "Updated schedule");
        Ok(())
    }
}

pub struct DeleteSchedule<'a, R> {
    repo: &'a R,
}

impl<'a, R> DeleteSchedule<'a, R>
where
    R: Repository<Id = ScheduleId, Entity = Schedule>,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Remove `target` with its component links and updates
    pub async fn handle(&self, target: &Schedule) -> Result<(), ActionError> {
        if !self.repo.delete(&target.id).await? {
            return Err(RepositoryError::not_found("schedule", target.id.to_string())
                .with_operation(RepositoryOperation::Delete)
                .into());
        }
        tracing::info!(schedule_id = %target.id, "Deleted schedule");
        Ok(())
    }
}
