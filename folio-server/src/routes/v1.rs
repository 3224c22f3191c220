use axum::{
    Router,
    routing::{get, post, put},
};
use folio_core::api::routes::{v1, v1_relative};

use crate::{
    handlers::{enrollments, media_sync},
    infra::app_state::AppState,
};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            v1_relative(v1::media::DRIVE_SYNC),
            post(media_sync::drive_sync_handler),
        )
        .route(
            v1_relative(v1::projects::MEDIA),
            get(media_sync::project_media_handler),
        )
        .route(
            v1_relative(v1::projects::MEDIA_RESYNC),
            post(media_sync::resync_project_media_handler),
        )
        .route(
            v1_relative(v1::students::SERVICES),
            put(enrollments::sync_student_services_handler),
        )
}
