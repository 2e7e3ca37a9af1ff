use serde::Deserialize;

use super::{code, invalid, required, text, Validate};
use crate::handlers::{ApiError, ApiOperation};
use crate::models::{
    ComponentGroupChanges, ComponentGroupCollapsed, ComponentId, NewComponentGroup,
    ResourceVisibility,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreComponentGroupRequest {
    pub name: Option<String>,
    pub order: Option<u32>,
    pub collapsed: Option<u8>,
    pub visible: Option<u8>,
    pub components: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComponentGroupRequest {
    pub name: Option<String>,
    pub order: Option<u32>,
    pub collapsed: Option<u8>,
    pub visible: Option<u8>,
    pub components: Option<Vec<u64>>,
}

fn member_ids(operation: ApiOperation, ids: Vec<u64>) -> Result<Vec<ComponentId>, ApiError> {
    let mut members: Vec<ComponentId> = Vec::with_capacity(ids.len());
    for id in ids {
        if id == 0 {
            return Err(invalid(operation, "components", "Component ids must be positive."));
        }
        let id = ComponentId::new(id);
        if !members.contains(&id) {
            members.push(id);
        }
    }
    Ok(members)
}

impl Validate for StoreComponentGroupRequest {
    type Output = NewComponentGroup;

    fn validate(self) -> Result<NewComponentGroup, ApiError> {
        const OP: ApiOperation = ApiOperation::Create;
        let name = self.name.ok_or_else(|| required(OP, "name"))?;

        Ok(NewComponentGroup {
            name: text(OP, "name", name)?,
            order: self.order.unwrap_or(0),
            collapsed: self
                .collapsed
                .map(|value| code(OP, "collapsed", value))
                .transpose()?
                .unwrap_or(ComponentGroupCollapsed::Expanded),
            visible: self
                .visible
                .map(|value| code(OP, "visible", value))
                .transpose()?
                .unwrap_or(ResourceVisibility::Guest),
            components: member_ids(OP, self.components.unwrap_or_default())?,
        })
    }
}

impl Validate for UpdateComponentGroupRequest {
    type Output = ComponentGroupChanges;

    fn validate(self) -> Result<ComponentGroupChanges, ApiError> {
        const OP: ApiOperation = ApiOperation::Update;

        Ok(ComponentGroupChanges {
            name: self.name.map(|name| text(OP, "name", name)).transpose()?,
            order: self.order,
            collapsed: self
                .collapsed
                .map(|value| code(OP, "collapsed", value))
                .transpose()?,
            visible: self
                .visible
                .map(|value| code(OP, "visible", value))
                .transpose()?,
            components: self
                .components
                .map(|ids| member_ids(OP, ids))
                .transpose()?,
        })
    }
}
