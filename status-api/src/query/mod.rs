//! Allow-list driven list queries
//!
//! Raw `sort`, `include`, `filters[...]`, `page` and `per_page` parameters are
//! validated against a per-resource [`ResourceQueryConfig`] by [`QueryBuilder`],
//! producing a [`QuerySpec`] that executes as one simply paginated read.
//!
//! ```rust
//! use status_api::config::PaginationConfig;
//! use status_api::query::{QueryBuilder, QueryParams, COMPONENT_GROUPS};
//!
//! let pagination = PaginationConfig::default();
//! let spec = QueryBuilder::for_resource(&COMPONENT_GROUPS, &pagination)
//!     .build(&QueryParams::new().with_sort("name").with_per_page("2"))
//!     .unwrap();
//! assert_eq!(spec.page.size, 2);
//! ```

mod allow_list;
mod builder;
mod page;
mod params;

pub use allow_list::{MatchMode, ResourceQueryConfig, COMPONENT_GROUPS, SCHEDULES};
pub use builder::{QueryBuilder, QuerySpec};
pub use page::{Page, PageRequest};
pub use params::QueryParams;
