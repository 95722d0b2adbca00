//! Production redaction of error responses

use crate::error::PublicErrorBody;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Replace error bodies with their public form when running in production.
///
/// Responses that did not come from an `HttpAppError` pass through untouched.
pub async fn error_details_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let public = response.extensions_mut().remove::<PublicErrorBody>();

    match public {
        Some(PublicErrorBody(body)) if state.config.is_production() => {
            let (parts, _) = response.into_parts();
            let body = Json(body).into_response().into_body();
            Response::from_parts(parts, body)
        }
        _ => response,
    }
}
