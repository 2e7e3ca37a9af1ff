//! # status-api
//!
//! REST API for a status page: component groups and scheduled maintenance
//! windows, served by axum over an in-memory store.
//!
//! ## Features
//!
//! - **Query builder**: allow-listed `sort`, `filters[...]`, `include` and
//!   simple pagination, validated before storage is touched
//! - **Permission guard**: ability checks on bearer-token claims for every
//!   mutating endpoint
//! - **Actions**: create, update and delete as single storage operations
//! - **Presenters**: resource objects with optional included relationships
//! - **Middleware stack**: JWT verification, request ids, sensitive header
//!   masking, panic recovery, body size limits
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use status_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!
//!     let state = AppState::builder()
//!         .config(config.clone())
//!         .build()
//!         .await?;
//!
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod query;
pub mod repository;
pub mod requests;
pub mod resources;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::guard::{guard, AbilityChecker, Caller, TokenAbilities};
    pub use crate::handlers::{
        ApiError, ApiErrorKind, ApiOperation, ItemResponse, ListResponse, NoContent, PageMeta,
    };
    pub use crate::health::health;
    pub use crate::middleware::{Claims, TokenAuth, TokenValidator};
    pub use crate::observability::init_tracing;
    pub use crate::query::{Page, PageRequest, QueryBuilder, QueryParams, QuerySpec};
    pub use crate::repository::{
        FetchPlan, FilterCondition, OrderDirection, Repository, RepositoryError,
        RepositoryErrorKind, RepositoryOperation, RepositoryResult,
    };
    pub use crate::resources::{Present, ResourceObject};
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::{AppState, AppStateBuilder};
    pub use crate::store::MemoryStore;

    pub use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Json, Response},
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    pub use tracing::{debug, error, info, warn};

    pub use tokio;
}
