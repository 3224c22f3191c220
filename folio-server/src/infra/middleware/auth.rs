use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use folio_core::{auth::AuthenticatedUser, reconcile::ReconcileError};
use std::convert::Infallible;
use tracing::error;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Attach the caller's [`AuthenticatedUser`] when a valid bearer session is
/// presented. Requests without one pass through untouched; handlers decide
/// whether that is acceptable. A failed session lookup ends the request
/// with a storage error.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(&request) {
        match state.authenticator.authenticate(&token).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(user);
            }
            Ok(None) => {}
            Err(err) => {
                error!(error = %err, "session lookup failed");
                return AppError::from(err).into_response();
            }
        }
    }

    next.run(request).await
}

fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

/// The caller attached by [`optional_auth_middleware`], if any.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl MaybeUser {
    pub fn require(self) -> AppResult<AuthenticatedUser> {
        self.0
            .ok_or_else(|| AppError::from(ReconcileError::Unauthorized))
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthenticatedUser>().copied()))
    }
}
