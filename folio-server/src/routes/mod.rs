pub mod v1;

use axum::{Router, middleware};
use folio_core::api::routes::{HEALTH, v1::ROOT};

use crate::{
    handlers::health::health_handler,
    infra::{app_state::AppState, middleware::optional_auth_middleware},
};

/// Create the main API router with all versions
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(HEALTH, axum::routing::get(health_handler))
        .nest(
            ROOT,
            v1::create_v1_router().layer(middleware::from_fn_with_state(
                state,
                optional_auth_middleware,
            )),
        )
}
