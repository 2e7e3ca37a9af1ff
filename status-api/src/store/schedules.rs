use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use super::{by_order_then_id, keys, select, touch, MemoryStore, Sequences, Tables};
use crate::models::{
    NewSchedule, Relation, Schedule, ScheduleChanges, ScheduleComponent, ScheduleComponentLink,
    ScheduleId, Update,
};
use crate::repository::{
    FetchPlan, FilterCondition, OrderBy, Pagination, Repository, RepositoryError,
    RepositoryOperation, RepositoryResult,
};

const COMPONENTS: &str = "components";
const UPDATES: &str = "updates";
const USER: &str = "user";

/// Schedule collection backed by a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    store: Arc<MemoryStore>,
}

impl ScheduleStore {
    pub(super) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn load_relations(&self, tables: &Tables, schedules: &mut [Schedule], plan: &FetchPlan) {
        if schedules.is_empty() {
            return;
        }
        let wanted = keys(schedules);

        if plan.includes(COMPONENTS) {
            self.store.record_queries(1);
            let mut affected: BTreeMap<u64, Vec<ScheduleComponent>> = BTreeMap::new();
            for (&(schedule_id, component_id), &component_status) in &tables.schedule_components {
                if !wanted.contains(&schedule_id) {
                    continue;
                }
                if let Some(component) = tables.components.get(&component_id) {
                    affected.entry(schedule_id).or_default().push(ScheduleComponent {
                        component: component.clone(),
                        component_status,
                    });
                }
            }
            for schedule in schedules.iter_mut() {
                let mut components = affected.remove(&schedule.id.get()).unwrap_or_default();
                components.sort_by(|a, b| by_order_then_id(&a.component, &b.component));
                schedule.components = Relation::Loaded(components);
            }
        }

        if plan.includes(UPDATES) {
            self.store.record_queries(1);
            let mut notes: BTreeMap<u64, Vec<Update>> = BTreeMap::new();
            for update in tables.updates.values() {
                if wanted.contains(&update.schedule_id.get()) {
                    notes
                        .entry(update.schedule_id.get())
                        .or_default()
                        .push(update.clone());
                }
            }
            for schedule in schedules.iter_mut() {
                let mut updates = notes.remove(&schedule.id.get()).unwrap_or_default();
                updates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
                schedule.updates = Relation::Loaded(updates);
            }
        }

        if plan.includes(USER) {
            self.store.record_queries(1);
            for schedule in schedules.iter_mut() {
                let author = schedule
                    .user_id
                    .and_then(|id| tables.users.get(&id.get()).cloned());
                schedule.user = Relation::Loaded(author);
            }
        }
    }
}

fn replace_links(tables: &mut Tables, schedule: ScheduleId, links: &[ScheduleComponentLink]) {
    tables
        .schedule_components
        .retain(|&(owner, _), _| owner != schedule.get());
    for link in links {
        tables.schedule_components.insert(
            (schedule.get(), link.component_id.get()),
            link.component_status,
        );
    }
}

impl Repository for ScheduleStore {
    type Id = ScheduleId;
    type Entity = Schedule;
    type Create = NewSchedule;
    type Update = ScheduleChanges;

    async fn find_by_id(&self, id: &ScheduleId, plan: &FetchPlan) -> RepositoryResult<Option<Schedule>> {
        let tables = self.store.tables.read().await;
        self.store.record_queries(1);

        let Some(schedule) = tables.schedules.get(&id.get()).cloned() else {
            return Ok(None);
        };
        let mut found = [schedule];
        self.load_relations(&tables, &mut found, plan);
        let [schedule] = found;
        Ok(Some(schedule))
    }

    async fn find_all(
        &self,
        filters: &[FilterCondition],
        order_by: &[OrderBy],
        pagination: Pagination,
        plan: &FetchPlan,
    ) -> RepositoryResult<Vec<Schedule>> {
        let tables = self.store.tables.read().await;
        self.store.record_queries(1);

        let mut schedules = select(tables.schedules.values(), filters, order_by, pagination);
        self.load_relations(&tables, &mut schedules, plan);
        Ok(schedules)
    }

    async fn create(&self, data: NewSchedule) -> RepositoryResult<Schedule> {
        let mut tables = self.store.tables.write().await;
        self.store.begin_write(RepositoryOperation::Create)?;
        tables.ensure_components_exist(
            RepositoryOperation::Create,
            data.components.iter().map(|link| link.component_id),
        )?;

        let now = Utc::now();
        let id = ScheduleId::new(Sequences::next(&mut tables.sequences.schedule));
        let schedule = Schedule {
            id,
            name: data.name,
            message: data.message,
            scheduled_at: data.scheduled_at,
            completed_at: data.completed_at,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
            components: Relation::NotLoaded,
            updates: Relation::NotLoaded,
            user: Relation::NotLoaded,
        };
        tables.schedules.insert(id.get(), schedule.clone());
        replace_links(&mut tables, id, &data.components);

        tracing::debug!(schedule_id = %id, components = data.components.len(), "Schedule created");
        Ok(schedule)
    }

    async fn update(&self, id: &ScheduleId, changes: ScheduleChanges) -> RepositoryResult<()> {
        let mut tables = self.store.tables.write().await;
        self.store.begin_write(RepositoryOperation::Update)?;

        if let Some(links) = &changes.components {
            if tables.schedules.contains_key(&id.get()) {
                tables.ensure_components_exist(
                    RepositoryOperation::Update,
                    links.iter().map(|link| link.component_id),
                )?;
            }
        }

        let Some(schedule) = tables.schedules.get_mut(&id.get()) else {
            return Err(RepositoryError::not_found("schedule", id.to_string())
                .with_operation(RepositoryOperation::Update));
        };
        if let Some(name) = changes.name {
            schedule.name = name;
        }
        if let Some(message) = changes.message {
            schedule.message = message;
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            schedule.scheduled_at = scheduled_at;
        }
        if let Some(completed_at) = changes.completed_at {
            schedule.completed_at = completed_at;
        }
        touch(&mut schedule.updated_at);

        if let Some(links) = changes.components {
            replace_links(&mut tables, *id, &links);
        }
        Ok(())
    }

    async fn delete(&self, id: &ScheduleId) -> RepositoryResult<bool> {
        let mut tables = self.store.tables.write().await;
        self.store.begin_write(RepositoryOperation::Delete)?;

        if tables.schedules.remove(&id.get()).is_none() {
            return Ok(false);
        }
        replace_links(&mut tables, *id, &[]);
        tables.updates.retain(|_, update| update.schedule_id != *id);
        Ok(true)
    }
}
