use super::ActionError;
use crate::models::{ComponentGroup, ComponentGroupChanges, ComponentGroupId, NewComponentGroup};
use crate::repository::{Repository, RepositoryError, RepositoryOperation};

/// Persist a new group and move the listed components into it
pub struct CreateComponentGroup<'a, R> {
    repo: &'a R,
}

impl<'a, R> CreateComponentGroup<'a, R>
where
    R: Repository<Entity = ComponentGroup, Create = NewComponentGroup>,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, data: NewComponentGroup) -> Result<ComponentGroup, ActionError> {
        let group = self.repo.create(data).await?;
        tracing::info!(group_id = %group.id, name = %group.name, "Created component group");
        Ok(group)
    }
}

pub struct UpdateComponentGroup<'a, R> {
    repo: &'a R,
}

impl<'a, R> UpdateComponentGroup<'a, R>
where
    R: Repository<Id = ComponentGroupId, Entity = ComponentGroup, Update = ComponentGroupChanges>,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Patch `target`; a `components` list replaces its membership
    pub async fn handle(
        &self,
        target: &ComponentGroup,
        changes: ComponentGroupChanges,
    ) -> Result<(), ActionError> {
        self.repo.update(&target.id, changes).await?;
        tracing::info!(group_id = %target.id, "Updated component group");
        Ok(())
    }
}

pub struct DeleteComponentGroup<'a, R> {
    repo: &'a R,
}

impl<'a, R> DeleteComponentGroup<'a, R>
where
    R: Repository<Id = ComponentGroupId, Entity = ComponentGroup>,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Remove `target`; its components become ungrouped
    pub async fn handle(&self, target: &ComponentGroup) -> Result<(), ActionError> {
        if !self.repo.delete(&target.id).await? {
            return Err(RepositoryError::not_found("component_group", target.id.to_string())
                .with_operation(RepositoryOperation::Delete)
                .into());
        }
        tracing::info!(group_id = %target.id, "Deleted component group");
        Ok(())
    }
}
