//! `/api/component-groups` endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use super::error::{ApiError, ApiOperation};
use super::extract::{payload, record_id};
use super::response::{ItemResponse, ListResponse, NoContent};
use crate::actions::{CreateComponentGroup, DeleteComponentGroup, UpdateComponentGroup};
use crate::guard::{guard, Caller, COMPONENT_GROUPS_DELETE, COMPONENT_GROUPS_MANAGE};
use crate::models::{ComponentGroup, ComponentGroupId};
use crate::query::{QueryBuilder, QueryParams, COMPONENT_GROUPS};
use crate::repository::{FetchPlan, Repository};
use crate::requests::{StoreComponentGroupRequest, UpdateComponentGroupRequest, Validate};
use crate::resources::ResourceObject;
use crate::state::AppState;
use crate::store::ComponentGroupStore;

const ENTITY: &str = "component_group";

async fn resolve(
    repo: &ComponentGroupStore,
    id: ComponentGroupId,
    plan: &FetchPlan,
    operation: ApiOperation,
) -> Result<ComponentGroup, ApiError> {
    repo.find_by_id(&id, plan)
        .await
        .map_err(|e| ApiError::from(e).with_operation(operation))?
        .ok_or_else(|| ApiError::not_found(ENTITY, id.to_string()).with_operation(operation))
}

/// `GET /component-groups`
pub async fn index(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<ListResponse<ResourceObject>, ApiError> {
    let spec = QueryBuilder::for_resource(&COMPONENT_GROUPS, &state.config().pagination)
        .build(&params)?;
    let page = spec
        .paginate(&state.store().component_groups())
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::List))?;

    tracing::debug!(
        page = page.current_page,
        returned = page.len(),
        has_more = page.has_more,
        "Listed component groups"
    );
    Ok(ListResponse::present(page))
}

/// `POST /component-groups`
pub async fn store(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<StoreComponentGroupRequest>, JsonRejection>,
) -> Result<ItemResponse<ResourceObject>, ApiError> {
    const OP: ApiOperation = ApiOperation::Create;
    guard(state.abilities(), &caller, COMPONENT_GROUPS_MANAGE).map_err(|e| e.with_operation(OP))?;
    let data = payload(body, OP)?.validate()?;

    let repo = state.store().component_groups();
    let group = CreateComponentGroup::new(&repo)
        .handle(data)
        .await
        .map_err(|e| ApiError::from(e).with_operation(OP))?;
    Ok(ItemResponse::present(&group))
}

/// `GET /component-groups/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    params: QueryParams,
) -> Result<ItemResponse<ResourceObject>, ApiError> {
    const OP: ApiOperation = ApiOperation::Get;
    let plan = QueryBuilder::for_resource(&COMPONENT_GROUPS, &state.config().pagination)
        .fetch_plan(&params)?;
    let id = record_id(&raw_id, ENTITY, OP)?;

    let group = resolve(&state.store().component_groups(), id, &plan, OP).await?;
    Ok(ItemResponse::present(&group))
}

/// `PUT|PATCH /component-groups/{id}`; responds with the re-read record
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
    params: QueryParams,
    body: Result<Json<UpdateComponentGroupRequest>, JsonRejection>,
) -> Result<ItemResponse<ResourceObject>, ApiError> {
    const OP: ApiOperation = ApiOperation::Update;
    guard(state.abilities(), &caller, COMPONENT_GROUPS_MANAGE).map_err(|e| e.with_operation(OP))?;
    let changes = payload(body, OP)?.validate()?;
    let plan = QueryBuilder::for_resource(&COMPONENT_GROUPS, &state.config().pagination)
        .fetch_plan(&params)?;
    let id = record_id(&raw_id, ENTITY, OP)?;

    let repo = state.store().component_groups();
    let target = resolve(&repo, id, &FetchPlan::none(), OP).await?;
    UpdateComponentGroup::new(&repo)
        .handle(&target, changes)
        .await
        .map_err(|e| ApiError::from(e).with_operation(OP))?;

    let fresh = resolve(&repo, id, &plan, OP).await?;
    Ok(ItemResponse::present(&fresh))
}

/// `DELETE /component-groups/{id}`
pub async fn destroy(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<NoContent, ApiError> {
    const OP: ApiOperation = ApiOperation::Delete;
    guard(state.abilities(), &caller, COMPONENT_GROUPS_DELETE).map_err(|e| e.with_operation(OP))?;
    let id = record_id(&raw_id, ENTITY, OP)?;

    let repo = state.store().component_groups();
    let target = resolve(&repo, id, &FetchPlan::none(), OP).await?;
    DeleteComponentGroup::new(&repo)
        .handle(&target)
        .await
        .map_err(|e| ApiError::from(e).with_operation(OP))?;
    Ok(NoContent)
}
