//! Turns raw list parameters into a validated [`QuerySpec`]

use crate::config::PaginationConfig;
use crate::handlers::ApiError;
use crate::repository::{
    FetchPlan, FilterCondition, OrderBy, Repository, RepositoryResult,
};

use super::allow_list::{MatchMode, ResourceQueryConfig};
use super::page::{Page, PageRequest};
use super::params::QueryParams;

/// Field every listing falls back to so pages are deterministic
const TIE_BREAKER: &str = "id";

/// A list request checked against one resource's allow-list
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Requested sorts followed by the identifier tie-breaker
    pub sorts: Vec<OrderBy>,
    pub filters: Vec<FilterCondition>,
    pub plan: FetchPlan,
    pub page: PageRequest,
}

impl QuerySpec {
    /// Execute against storage with a one-row lookahead.
    pub async fn paginate<R>(&self, repo: &R) -> RepositoryResult<Page<R::Entity>>
    where
        R: Repository,
    {
        let window = self.page.window().with_lookahead();
        let rows = repo
            .find_all(&self.filters, &self.sorts, window, &self.plan)
            .await?;
        Ok(Page::from_lookahead(rows, self.page))
    }
}

pub struct QueryBuilder<'a> {
    config: &'static ResourceQueryConfig,
    pagination: &'a PaginationConfig,
}

impl<'a> QueryBuilder<'a> {
    pub fn for_resource(
        config: &'static ResourceQueryConfig,
        pagination: &'a PaginationConfig,
    ) -> Self {
        Self { config, pagination }
    }

    /// Validate every list parameter.
    ///
    /// # Errors
    ///
    /// A validation error naming the first offending parameter.
    pub fn build(&self, params: &QueryParams) -> Result<QuerySpec, ApiError> {
        let sorts = self.sorts(params.sort.as_deref())?;
        let filters = self.filters(params)?;
        let plan = self.fetch_plan(params)?;
        let page = self.page_request(params)?;

        tracing::debug!(
            resource = self.config.resource,
            sorts = ?sorts,
            filters = filters.len(),
            includes = plan.len(),
            page = page.number,
            per_page = page.size,
            "built list query"
        );

        Ok(QuerySpec {
            sorts,
            filters,
            plan,
            page,
        })
    }

    /// Validate only `include`, for single-record reads.
    pub fn fetch_plan(&self, params: &QueryParams) -> Result<FetchPlan, ApiError> {
        let mut plan = FetchPlan::none();
        for name in split_list(params.include.as_deref()) {
            let relation = self.config.includable_relation(name).ok_or_else(|| {
                ApiError::invalid_parameter(
                    "include",
                    format!(
                        "`{}` is not an includable relation of {}",
                        name, self.config.resource
                    ),
                )
            })?;
            plan = plan.with(relation);
        }
        Ok(plan)
    }

    fn sorts(&self, raw: Option<&str>) -> Result<Vec<OrderBy>, ApiError> {
        let mut sorts: Vec<OrderBy> = Vec::new();
        for entry in split_list(raw) {
            let (name, descending) = match entry.strip_prefix('-') {
                Some(name) => (name, true),
                None => (entry, false),
            };
            let field = self.config.sortable_field(name).ok_or_else(|| {
                ApiError::invalid_parameter(
                    "sort",
                    format!("`{}` is not a sortable field of {}", name, self.config.resource),
                )
            })?;
            if sorts.iter().any(|existing| existing.field == field) {
                return Err(ApiError::invalid_parameter(
                    "sort",
                    format!("`{}` is sorted on more than once", field),
                ));
            }
            sorts.push(if descending {
                OrderBy::desc(field)
            } else {
                OrderBy::asc(field)
            });
        }

        if !sorts.iter().any(|term| term.field == TIE_BREAKER) {
            sorts.push(OrderBy::asc(TIE_BREAKER));
        }
        Ok(sorts)
    }

    fn filters(&self, params: &QueryParams) -> Result<Vec<FilterCondition>, ApiError> {
        let mut conditions = Vec::with_capacity(params.filters.len());
        for (key, raw) in &params.filters {
            let (field, mode) = self.config.filter_mode(key).ok_or_else(|| {
                ApiError::invalid_parameter(
                    format!("filters[{}]", key),
                    format!("`{}` is not a filterable field of {}", key, self.config.resource),
                )
            })?;

            let mut values: Vec<String> = split_list(Some(raw)).map(str::to_string).collect();
            let condition = match (mode, values.len()) {
                (_, 0) => continue,
                (MatchMode::Exact, 1) => FilterCondition::eq(field, values.remove(0)),
                (MatchMode::Exact, _) => FilterCondition::in_list(field, values),
                (MatchMode::Partial, 1) => FilterCondition::like(field, values.remove(0)),
                (MatchMode::Partial, _) => FilterCondition::like(field, values),
            };
            conditions.push(condition);
        }
        Ok(conditions)
    }

    fn page_request(&self, params: &QueryParams) -> Result<PageRequest, ApiError> {
        let max = u64::from(self.pagination.max_per_page.max(1));
        let default = u64::from(self.pagination.default_per_page);

        let size = match parse_integer("per_page", params.per_page.as_deref())? {
            Some(requested) => requested.clamp(1, max as i64) as u64,
            None => default.clamp(1, max),
        };
        let number = match parse_integer("page", params.page.as_deref())? {
            Some(requested) if requested > 1 => requested as u64,
            _ => 1,
        };
        Ok(PageRequest::new(number, size))
    }
}

/// Non-empty, trimmed entries of a comma-separated parameter
fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

fn parse_integer(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            ApiError::invalid_parameter(field, format!("{} must be an integer", field))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use crate::query::allow_list::{COMPONENT_GROUPS, SCHEDULES};
    use crate::repository::{FilterOperator, FilterValue, OrderDirection};

    fn pagination() -> PaginationConfig {
        PaginationConfig {
            default_per_page: 15,
            max_per_page: 100,
        }
    }

    #[test]
    fn test_defaults() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&COMPONENT_GROUPS, &config)
            .build(&QueryParams::new())
            .unwrap();

        assert_eq!(spec.sorts, vec![OrderBy::asc("id")]);
        assert!(spec.filters.is_empty());
        assert!(spec.plan.is_empty());
        assert_eq!(spec.page, PageRequest::new(1, 15));
    }

    #[test]
    fn test_sort_with_direction_and_tie_breaker() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&SCHEDULES, &config)
            .build(&QueryParams::new().with_sort("-scheduled_at,name"))
            .unwrap();

        assert_eq!(
            spec.sorts,
            vec![
                OrderBy::desc("scheduled_at"),
                OrderBy::asc("name"),
                OrderBy::asc("id"),
            ]
        );
    }

    #[test]
    fn test_explicit_id_sort_is_not_duplicated() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&COMPONENT_GROUPS, &config)
            .build(&QueryParams::new().with_sort("-id"))
            .unwrap();
        assert_eq!(spec.sorts, vec![OrderBy::desc("id")]);
        assert_eq!(spec.sorts[0].direction, OrderDirection::Descending);
    }

    #[test]
    fn test_disallowed_sort_is_rejected() {
        let config = pagination();
        let error = QueryBuilder::for_resource(&COMPONENT_GROUPS, &config)
            .build(&QueryParams::new().with_sort("order"))
            .unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::ValidationFailed);
        assert_eq!(error.field.as_deref(), Some("sort"));
    }

    #[test]
    fn test_repeated_sort_field_is_rejected() {
        let config = pagination();
        let error = QueryBuilder::for_resource(&COMPONENT_GROUPS, &config)
            .build(&QueryParams::new().with_sort("name,-name"))
            .unwrap_err();
        assert_eq!(error.field.as_deref(), Some("sort"));
    }

    #[test]
    fn test_disallowed_include_is_rejected() {
        let config = pagination();
        let builder = QueryBuilder::for_resource(&COMPONENT_GROUPS, &config);
        let error = builder
            .build(&QueryParams::new().with_include("components,updates"))
            .unwrap_err();
        assert_eq!(error.field.as_deref(), Some("include"));

        let show = builder
            .fetch_plan(&QueryParams::new().with_include("user"))
            .unwrap_err();
        assert_eq!(show.field.as_deref(), Some("include"));
    }

    #[test]
    fn test_includes_become_fetch_plan() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&SCHEDULES, &config)
            .build(&QueryParams::new().with_include("updates, user,"))
            .unwrap();
        assert!(spec.plan.includes("updates"));
        assert!(spec.plan.includes("user"));
        assert!(!spec.plan.includes("components"));
    }

    #[test]
    fn test_filter_match_modes() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&SCHEDULES, &config)
            .build(
                &QueryParams::new()
                    .with_filter("name", "db")
                    .with_filter("status", "0,1"),
            )
            .unwrap();

        assert_eq!(spec.filters.len(), 2);
        let name = spec.filters.iter().find(|f| f.field == "name").unwrap();
        assert_eq!(name.operator, FilterOperator::Like);
        assert_eq!(name.value, FilterValue::Text("db".into()));

        let status = spec.filters.iter().find(|f| f.field == "status").unwrap();
        assert_eq!(status.operator, FilterOperator::In);
        assert_eq!(
            status.value,
            FilterValue::List(vec!["0".to_string(), "1".to_string()])
        );
    }

    #[test]
    fn test_empty_filter_value_is_ignored() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&SCHEDULES, &config)
            .build(&QueryParams::new().with_filter("name", " , "))
            .unwrap();
        assert!(spec.filters.is_empty());
    }

    #[test]
    fn test_disallowed_filter_names_key() {
        let config = pagination();
        let error = QueryBuilder::for_resource(&COMPONENT_GROUPS, &config)
            .build(&QueryParams::new().with_filter("name", "api"))
            .unwrap_err();
        assert_eq!(error.field.as_deref(), Some("filters[name]"));
    }

    #[test]
    fn test_per_page_is_clamped() {
        let config = pagination();
        let builder = QueryBuilder::for_resource(&SCHEDULES, &config);

        let huge = builder.build(&QueryParams::new().with_per_page("5000")).unwrap();
        assert_eq!(huge.page.size, 100);

        let zero = builder.build(&QueryParams::new().with_per_page("0")).unwrap();
        assert_eq!(zero.page.size, 1);

        let negative = builder.build(&QueryParams::new().with_per_page("-4")).unwrap();
        assert_eq!(negative.page.size, 1);
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        let config = pagination();
        let spec = QueryBuilder::for_resource(&SCHEDULES, &config)
            .build(&QueryParams::new().with_page("-2"))
            .unwrap();
        assert_eq!(spec.page.number, 1);
    }

    #[test]
    fn test_non_numeric_pagination_is_rejected() {
        let config = pagination();
        let builder = QueryBuilder::for_resource(&SCHEDULES, &config);

        let error = builder.build(&QueryParams::new().with_page("two")).unwrap_err();
        assert_eq!(error.field.as_deref(), Some("page"));

        let error = builder
            .build(&QueryParams::new().with_per_page("lots"))
            .unwrap_err();
        assert_eq!(error.field.as_deref(), Some("per_page"));
    }

    #[test]
    fn test_default_per_page_respects_max() {
        let config = PaginationConfig {
            default_per_page: 50,
            max_per_page: 20,
        };
        let spec = QueryBuilder::for_resource(&SCHEDULES, &config)
            .build(&QueryParams::new())
            .unwrap();
        assert_eq!(spec.page.size, 20);
    }
}
