use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use magazine_core::AppError;
use magazine_storage::{ResolvedUrl, SignedUrl};
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignedUrlQuery {
    #[serde(default)]
    key: String,
}

/// Mint a temporary GET URL for a stored object.
///
/// A signing failure still answers 200 with an empty `url`.
pub async fn get_signed_url(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SignedUrlQuery>,
) -> Result<Json<ResolvedUrl>, HttpAppError> {
    let key = query.key.trim();
    if key.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "key query parameter is required".to_string(),
        )));
    }

    let signed = SignedUrl::new(key, state.signer.clone());
    Ok(Json(signed.resolve().await))
}
