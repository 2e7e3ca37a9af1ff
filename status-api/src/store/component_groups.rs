use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use super::{by_order_then_id, keys, select, touch, MemoryStore, Sequences, Tables};
use crate::models::{
    Component, ComponentGroup, ComponentGroupChanges, ComponentGroupId, ComponentId,
    NewComponentGroup, Relation,
};
use crate::repository::{
    FetchPlan, FilterCondition, OrderBy, Pagination, Repository, RepositoryError,
    RepositoryOperation, RepositoryResult,
};

const COMPONENTS: &str = "components";

/// Component group collection backed by a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct ComponentGroupStore {
    store: Arc<MemoryStore>,
}

impl ComponentGroupStore {
    pub(super) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Attach requested relations with one batched read each
    fn load_relations(&self, tables: &Tables, groups: &mut [ComponentGroup], plan: &FetchPlan) {
        if groups.is_empty() || !plan.includes(COMPONENTS) {
            return;
        }
        self.store.record_queries(1);

        let wanted = keys(groups);
        let mut members: BTreeMap<u64, Vec<Component>> = BTreeMap::new();
        for component in tables.components.values() {
            if let Some(group_id) = component.component_group_id {
                if wanted.contains(&group_id.get()) {
                    members
                        .entry(group_id.get())
                        .or_default()
                        .push(component.clone());
                }
            }
        }

        for group in groups {
            let mut components = members.remove(&group.id.get()).unwrap_or_default();
            components.sort_by(by_order_then_id);
            group.components = Relation::Loaded(components);
        }
    }
}

/// Point exactly `members` at `group`, releasing anything else it held
fn sync_membership(tables: &mut Tables, group: ComponentGroupId, members: &[ComponentId]) {
    let now = Utc::now();
    for component in tables.components.values_mut() {
        let listed = members.contains(&component.id);
        let held = component.component_group_id == Some(group);
        if listed && !held {
            component.component_group_id = Some(group);
            component.updated_at = now;
        } else if held && !listed {
            component.component_group_id = None;
            component.updated_at = now;
        }
    }
}

impl Repository for ComponentGroupStore {
    type Id = ComponentGroupId;
    type Entity = ComponentGroup;
    type Create = NewComponentGroup;
    type Update = ComponentGroupChanges;

    async fn find_by_id(
        &self,
        id: &ComponentGroupId,
        plan: &FetchPlan,
    ) -> RepositoryResult<Option<ComponentGroup>> {
        let tables = self.store.tables.read().await;
        self.store.record_queries(1);

        let Some(group) = tables.component_groups.get(&id.get()).cloned() else {
            return Ok(None);
        };
        let mut found = [group];
        self.load_relations(&tables, &mut found, plan);
        let [group] = found;
        Ok(Some(group))
    }

    async fn find_all(
        &self,
        filters: &[FilterCondition],
        order_by: &[OrderBy],
        pagination: Pagination,
        plan: &FetchPlan,
    ) -> RepositoryResult<Vec<ComponentGroup>> {
        let tables = self.store.tables.read().await;
        self.store.record_queries(1);

        let mut groups = select(
            tables.component_groups.values(),
            filters,
            order_by,
            pagination,
        );
        self.load_relations(&tables, &mut groups, plan);
        Ok(groups)
    }

    async fn create(&self, data: NewComponentGroup) -> RepositoryResult<ComponentGroup> {
        let mut tables = self.store.tables.write().await;
        self.store.begin_write(RepositoryOperation::Create)?;
        tables.ensure_components_exist(RepositoryOperation::Create, data.components.iter().copied())?;

        let now = Utc::now();
        let id = ComponentGroupId::new(Sequences::next(&mut tables.sequences.component_group));
        let group = ComponentGroup {
            id,
            name: data.name,
            order: data.order,
            collapsed: data.collapsed,
            visible: data.visible,
            created_at: now,
            updated_at: now,
            components: Relation::NotLoaded,
        };
        tables.component_groups.insert(id.get(), group.clone());
        sync_membership(&mut tables, id, &data.components);

        tracing::debug!(group_id = %id, members = data.components.len(), "Component group created");
        Ok(group)
    }

    async fn update(
        &self,
        id: &ComponentGroupId,
        changes: ComponentGroupChanges,
    ) -> RepositoryResult<()> {
        let mut tables = self.store.tables.write().await;
        self.store.begin_write(RepositoryOperation::Update)?;

        if !tables.component_groups.contains_key(&id.get()) {
            return Err(RepositoryError::not_found("component_group", id.to_string())
                .with_operation(RepositoryOperation::Update));
        }
        if let Some(members) = &changes.components {
            tables.ensure_components_exist(RepositoryOperation::Update, members.iter().copied())?;
        }

        let Some(group) = tables.component_groups.get_mut(&id.get()) else {
            return Err(RepositoryError::not_found("component_group", id.to_string())
                .with_operation(RepositoryOperation::Update));
        };
        if let Some(name) = changes.name {
            group.name = name;
        }
        if let Some(order) = changes.order {
            group.order = order;
        }
        if let Some(collapsed) = changes.collapsed {
            group.collapsed = collapsed;
        }
        if let Some(visible) = changes.visible {
            group.visible = visible;
        }
        touch(&mut group.updated_at);

        if let Some(members) = changes.components {
            sync_membership(&mut tables, *id, &members);
        }
        Ok(())
    }

    async fn delete(&self, id: &ComponentGroupId) -> RepositoryResult<bool> {
        let mut tables = self.store.tables.write().await;
        self.store.begin_write(RepositoryOperation::Delete)?;

        if tables.component_groups.remove(&id.get()).is_none() {
            return Ok(false);
        }
        // Members survive as ungrouped components
        sync_membership(&mut tables, *id, &[]);
        Ok(true)
    }
}
