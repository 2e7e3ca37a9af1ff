//! In-memory storage backend
//!
//! All tables live behind one `tokio::sync::RwLock`; every repository call
//! takes the lock once, so single-record writes are atomic and concurrent
//! writers are last-writer-wins. A query counter records one round-trip per
//! base read or write plus one per relation batch so tests can assert that
//! eager loading does not fan out per record.

mod component_groups;
mod schedules;
mod seed;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{
    Component, ComponentGroup, ComponentId, ComponentStatus, NewComponent, Schedule, ScheduleId,
    Update, UpdateId, User, UserId,
};
use crate::repository::{
    FilterCondition, OrderBy, OrderDirection, Pagination, Queryable, RepositoryError,
    RepositoryOperation, RepositoryResult,
};

pub use component_groups::ComponentGroupStore;
pub use schedules::ScheduleStore;

#[derive(Debug, Default)]
struct Sequences {
    component_group: u64,
    component: u64,
    schedule: u64,
    update: u64,
    user: u64,
}

impl Sequences {
    fn next(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }
}

#[derive(Debug, Default)]
struct Tables {
    component_groups: BTreeMap<u64, ComponentGroup>,
    components: BTreeMap<u64, Component>,
    schedules: BTreeMap<u64, Schedule>,
    /// (schedule, component) -> status the component is in during the window
    schedule_components: BTreeMap<(u64, u64), ComponentStatus>,
    updates: BTreeMap<u64, Update>,
    users: BTreeMap<u64, User>,
    sequences: Sequences,
}

impl Tables {
    /// Fail with a constraint violation naming the first unknown component
    fn ensure_components_exist(
        &self,
        operation: RepositoryOperation,
        ids: impl IntoIterator<Item = ComponentId>,
    ) -> RepositoryResult<()> {
        for id in ids {
            if !self.components.contains_key(&id.get()) {
                return Err(RepositoryError::constraint_violation(
                    operation,
                    format!("component {} does not exist", id),
                )
                .with_entity("component", id.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    queries: AtomicU64,
    fail_next_write: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn component_groups(self: &Arc<Self>) -> ComponentGroupStore {
        ComponentGroupStore::new(Arc::clone(self))
    }

    pub fn schedules(self: &Arc<Self>) -> ScheduleStore {
        ScheduleStore::new(Arc::clone(self))
    }

    /// Storage round-trips issued by repository calls so far
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make the next repository write fail with a database error
    pub fn inject_write_failure(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    fn record_queries(&self, count: u64) {
        self.queries.fetch_add(count, Ordering::SeqCst);
    }

    /// Counts the write and consumes a pending injected failure
    fn begin_write(&self, operation: RepositoryOperation) -> RepositoryResult<()> {
        self.record_queries(1);
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            tracing::warn!(%operation, "Injected storage failure");
            return Err(RepositoryError::database_error(
                operation,
                "injected write failure",
            ));
        }
        Ok(())
    }

    pub async fn insert_component(&self, new: NewComponent) -> Component {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let id = Sequences::next(&mut tables.sequences.component);
        let component = Component {
            id: ComponentId::new(id),
            name: new.name,
            description: new.description,
            link: new.link,
            status: new.status,
            order: new.order,
            component_group_id: new.component_group_id,
            enabled: new.enabled,
            created_at: now,
            updated_at: now,
        };
        tables.components.insert(id, component.clone());
        component
    }

    pub async fn find_component(&self, id: ComponentId) -> Option<Component> {
        self.tables.read().await.components.get(&id.get()).cloned()
    }

    pub async fn insert_user(&self, name: impl Into<String>, email: impl Into<String>) -> User {
        let mut tables = self.tables.write().await;
        let id = Sequences::next(&mut tables.sequences.user);
        let user = User {
            id: UserId::new(id),
            name: name.into(),
            email: email.into(),
        };
        tables.users.insert(id, user.clone());
        user
    }

    /// Post a progress note on a schedule
    pub async fn insert_update(
        &self,
        schedule_id: ScheduleId,
        message: impl Into<String>,
        user_id: Option<UserId>,
    ) -> RepositoryResult<Update> {
        let mut tables = self.tables.write().await;
        if !tables.schedules.contains_key(&schedule_id.get()) {
            return Err(RepositoryError::not_found("schedule", schedule_id.to_string())
                .with_operation(RepositoryOperation::Create));
        }
        let id = Sequences::next(&mut tables.sequences.update);
        let update = Update {
            id: UpdateId::new(id),
            schedule_id,
            message: message.into(),
            user_id,
            created_at: Utc::now(),
        };
        tables.updates.insert(id, update.clone());
        Ok(update)
    }
}

/// Filter, order and window a table scan.
///
/// Rows are ordered by each term in turn and finally by ascending key.
fn select<'a, T, I>(
    rows: I,
    filters: &[FilterCondition],
    order_by: &[OrderBy],
    pagination: Pagination,
) -> Vec<T>
where
    T: Queryable + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut matched: Vec<&T> = rows
        .into_iter()
        .filter(|row| {
            filters
                .iter()
                .all(|filter| filter.matches(&row.field(filter.field)))
        })
        .collect();

    matched.sort_by(|a, b| {
        order_by
            .iter()
            .map(|term| {
                let ordering = a.field(term.field).sort_cmp(&b.field(term.field));
                match term.direction {
                    OrderDirection::Ascending => ordering,
                    OrderDirection::Descending => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.key().cmp(&b.key()))
    });

    let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
    matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

/// Keys of a batch of parents, for relation lookups
fn keys<T: Queryable>(rows: &[T]) -> BTreeSet<u64> {
    rows.iter().map(Queryable::key).collect()
}

fn by_order_then_id(a: &Component, b: &Component) -> std::cmp::Ordering {
    a.order.cmp(&b.order).then(a.id.cmp(&b.id))
}

fn touch(updated_at: &mut DateTime<Utc>) {
    *updated_at = Utc::now();
}
