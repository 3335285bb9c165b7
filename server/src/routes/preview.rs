//! Preview panel endpoints
//!
//! Rendering runs the JavaScript engine synchronously, so every panel
//! access goes through `spawn_blocking`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use component_analysis::{analyze, extract_code_block, MockPropertySet};
use preview_sandbox::{PreviewDisplay, PreviewPanel};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    pub code: String,
    /// Props to render with; derived from the analysis when absent
    #[serde(default)]
    pub props: Option<MockPropertySet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    /// False when the inputs matched the previous render
    pub rendered: bool,
    pub display: PreviewDisplay,
}

async fn with_panel<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut PreviewPanel) -> T + Send + 'static,
{
    let panel = Arc::clone(&state.preview);
    tokio::task::spawn_blocking(move || f(&mut panel.lock()))
        .await
        .map_err(|e| ApiError::Internal(format!("Preview task failed: {}", e)))
}

pub async fn render(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(request) = payload?;
    let code = extract_code_block(&request.code);
    let props = match request.props {
        Some(props) => props,
        None => MockPropertySet::from_summary(&analyze(&code).summary),
    };

    let response = with_panel(&state, move |panel| {
        let rendered = panel.update(&code, &props);
        PreviewResponse {
            rendered,
            display: panel.mount_point().display(),
        }
    })
    .await?;

    if let PreviewDisplay::Failed { failure } = &response.display {
        log::info!("Preview failed: {}", failure);
    }
    Ok(Json(response))
}

pub async fn current(State(state): State<AppState>) -> Result<Json<PreviewDisplay>, ApiError> {
    let display = with_panel(&state, |panel| panel.mount_point().display()).await?;
    Ok(Json(display))
}

pub async fn clear(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    with_panel(&state, |panel| panel.unmount()).await?;
    Ok(StatusCode::NO_CONTENT)
}
