//! `/api/schedules` endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use super::error::{ApiError, ApiOperation};
use super::extract::{payload, record_id};
use super::response::{ItemResponse, ListResponse, NoContent};
use crate::actions::{CreateSchedule, DeleteSchedule, UpdateSchedule};
use crate::guard::{guard, Caller, SCHEDULES_DELETE, SCHEDULES_MANAGE};
use crate::models::{Schedule, ScheduleId};
use crate::query::{QueryBuilder, QueryParams, SCHEDULES};
use crate::repository::{FetchPlan, Repository};
use crate::requests::{StoreScheduleRequest, UpdateScheduleRequest, Validate};
use crate::resources::ResourceObject;
use crate::state::AppState;
use crate::store::ScheduleStore;

const ENTITY: &str = "schedule";

async fn resolve(
    repo: &ScheduleStore,
    id: ScheduleId,
    plan: &FetchPlan,
    operation: ApiOperation,
) -> Result<Schedule, ApiError> {
    repo.find_by_id(&id, plan)
        .await
        .map_err(|e| ApiError::from(e).with_operation(operation))?
        .ok_or_else(|| ApiError::not_found(ENTITY, id.to_string()).with_operation(operation))
}

/// `GET /schedules`
pub async fn index(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<ListResponse<ResourceObject>, ApiError> {
    let spec = QueryBuilder::for_resource(&SCHEDULES, &state.config().pagination).build(&params)?;
    let page = spec
        .paginate(&state.store().schedules())
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::List))?;
    Ok(ListResponse::present(page))
}

/// `POST /schedules`
pub async fn store(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<StoreScheduleRequest>, JsonRejection>,
) -> Result<ItemResponse<ResourceObject>, ApiError> {
    const OP: ApiOperation = ApiOperation::Create;
    guard(state.abilities(), &caller, SCHEDULES_MANAGE).map_err(|e| e.with_operation(OP))?;
    let data = payload(body, OP)?.validate()?;

    let repo = state.store().schedules();
    let schedule = CreateSchedule::new(&repo)
        .handle(data, &caller)
        .await
        .map_err(|e| ApiError::from(e).with_operation(OP))?;
    Ok(ItemResponse::present(&schedule))
}

/// `GET /schedules/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    params: QueryParams,
) -> Result<ItemResponse<ResourceObject>, ApiError> {
    const OP: ApiOperation = ApiOperation::Get;
    let plan = QueryBuilder::for_resource(&SCHEDULES, &state.config().pagination)
        .fetch_plan(&params)?;
    let id = record_id(&raw_id, ENTITY, OP)?;

    let schedule = resolve(&state.store().schedules(), id, &plan, OP).await?;
    Ok(ItemResponse::present(&schedule))
}

/// `PUT|PATCH /schedules/{id}`
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
    params: QueryParams,
    body: Result<Json<UpdateScheduleRequest>, JsonRejection>,
) -> Result<ItemResponse<ResourceObject>, ApiError> {
    const OP: ApiOperation = ApiOperation::Update;
    guard(state.abilities(), &caller, SCHEDULES_MANAGE).map_err(|e| e.with_operation(OP))?;
    let changes = payload(body, OP)?.validate()?;
    let plan = QueryBuilder::for_resource(&SCHEDULES, &state.config().pagination)
        .fetch_plan(&params)?;
    let id = record_id(&raw_id, ENTITY, OP)?;

    let repo = state.store().schedules();
    let target = resolve(&repo, id, &FetchPlan::none(), OP).await?;
    UpdateSchedule::new(&repo)
        .handle(&target, changes)
        .await
        .map_err(|e| ApiError::from(e).with_operation(OP))?;

    let fresh = resolve(&repo, id, &plan, OP).await?;
    Ok(ItemResponse::present(&fresh))
}

/// `DELETE /schedules/{id}`
pub async fn destroy(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<NoContent, ApiError> {
    const OP: ApiOperation = ApiOperation::Delete;
    guard(state.abilities(), &caller, SCHEDULES_DELETE).map_err(|e| e.with_operation(OP))?;
    let id = record_id(&raw_id, ENTITY, OP)?;

    let repo = state.store().schedules();
    let target = resolve(&repo, id, &FetchPlan::none(), OP).await?;
    DeleteSchedule::new(&repo)
        .handle(&target)
        .await
        .map_err(|e| ApiError::from(e).with_operation(OP))?;
    Ok(NoContent)
}
