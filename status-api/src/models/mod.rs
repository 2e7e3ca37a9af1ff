//! Status-page entities and their validated write payloads

mod component;
mod component_group;
mod enums;
mod ids;
mod relation;
mod schedule;
mod user;

pub use component::{Component, NewComponent};
pub use component_group::{ComponentGroup, ComponentGroupChanges, NewComponentGroup};
pub use enums::{ComponentGroupCollapsed, ComponentStatus, ResourceVisibility, ScheduleStatus};
pub use ids::{ComponentGroupId, ComponentId, ScheduleId, UpdateId, UserId};
pub use relation::Relation;
pub use schedule::{
    NewSchedule, Schedule, ScheduleChanges, ScheduleComponent, ScheduleComponentLink,
};
pub use user::{Update, User};
