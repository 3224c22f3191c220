use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use folio_core::api::types::{StudentServicesRequest, StudentServicesResponse};
use folio_model::{ServiceID, StudentID};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::MaybeUser,
};

/// `PUT /api/v1/students/{id}/services`
///
/// Replaces the student's service links with `serviceIds`.
pub async fn sync_student_services_handler(
    State(state): State<AppState>,
    caller: MaybeUser,
    Path(student_id): Path<String>,
    body: Result<Json<StudentServicesRequest>, JsonRejection>,
) -> AppResult<Json<StudentServicesResponse>> {
    caller.require()?;
    let student_id: StudentID = student_id.parse().map_err(|_| {
        AppError::bad_request(format!("Invalid student id: {student_id}"))
    })?;
    let Json(request) =
        body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let desired: Vec<ServiceID> =
        request.service_ids.into_iter().map(ServiceID::from).collect();

    let outcome = state
        .enrollment_reconciler
        .sync_student_services(student_id, &desired)
        .await?;

    Ok(Json(StudentServicesResponse {
        success: true,
        linked: outcome.linked,
        added: outcome.added,
        removed: outcome.removed,
    }))
}
