use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use folio_core::api::types::{
    DriveSyncRequest, DriveSyncResponse, ProjectMediaResponse,
};
use folio_core::reconcile::ReconcileError;
use folio_model::ProjectID;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::MaybeUser,
};

/// `POST /api/v1/media/drive-sync`
pub async fn drive_sync_handler(
    State(state): State<AppState>,
    caller: MaybeUser,
    body: Result<Json<DriveSyncRequest>, JsonRejection>,
) -> AppResult<Json<DriveSyncResponse>> {
    // Authentication is checked before the body is looked at.
    let caller = caller.require()?;
    let Json(request) =
        body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let outcome = state
        .media_reconciler
        .reconcile(Some(&caller), &request)
        .await?;

    Ok(Json(DriveSyncResponse::synced(outcome.files_count)))
}

/// `GET /api/v1/projects/{id}/media`
pub async fn project_media_handler(
    State(state): State<AppState>,
    caller: MaybeUser,
    Path(project_id): Path<String>,
) -> AppResult<Json<ProjectMediaResponse>> {
    caller.require()?;
    let project_id = parse_project_id(&project_id)?;

    let media = state
        .unit_of_work
        .media_records
        .list_for_project(project_id)
        .await?;

    Ok(Json(ProjectMediaResponse { media }))
}

/// `POST /api/v1/projects/{id}/media/resync`
///
/// Reconciles against the folder URL stored on the project.
pub async fn resync_project_media_handler(
    State(state): State<AppState>,
    caller: MaybeUser,
    Path(project_id): Path<String>,
) -> AppResult<Json<DriveSyncResponse>> {
    let caller = caller.require()?;
    let project_id = parse_project_id(&project_id)?;

    let project = state
        .unit_of_work
        .projects
        .get_project(project_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Project {project_id} not found"))
        })?;

    let folder_url = project
        .drive_folder_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ReconcileError::MissingInput("driveFolderUrl".into()))?;

    let outcome = state
        .media_reconciler
        .reconcile_folder(&caller, folder_url, project_id)
        .await?;

    Ok(Json(DriveSyncResponse::synced(outcome.files_count)))
}

fn parse_project_id(raw: &str) -> AppResult<ProjectID> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("Invalid project id: {raw}")))
}
