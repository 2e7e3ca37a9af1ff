//! Route table
//!
//! Resources live under `/api`; `/health` stays outside it. When bearer
//! verification is configured it wraps every route; a request without
//! usable claims reaches its handler anonymously.

use axum::{middleware, routing::get, Router};

use crate::handlers::{component_groups, schedules};
use crate::health::health;
use crate::middleware::TokenAuth;
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/component-groups",
            get(component_groups::index).post(component_groups::store),
        )
        .route(
            "/component-groups/{id}",
            get(component_groups::show)
                .put(component_groups::update)
                .patch(component_groups::update)
                .delete(component_groups::destroy),
        )
        .route("/schedules", get(schedules::index).post(schedules::store))
        .route(
            "/schedules/{id}",
            get(schedules::show)
                .put(schedules::update)
                .patch(schedules::update)
                .delete(schedules::destroy),
        )
}

/// Full application router, state attached
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health));

    if let Some(auth) = state.auth().cloned() {
        app = app.layer(middleware::from_fn_with_state(auth, TokenAuth::middleware));
    } else {
        tracing::debug!("Bearer verification disabled; every caller is anonymous");
    }

    app.with_state(state)
}
